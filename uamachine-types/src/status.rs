use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a read or write, carrying the OPC UA numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    Good,
    BadInternalError,
    BadNodeIdUnknown,
    BadNotReadable,
    BadNotWritable,
    BadOutOfRange,
    BadParentNodeIdInvalid,
    BadNodeIdExists,
    BadNodeClassInvalid,
    BadBrowseNameDuplicated,
    BadTypeMismatch,
}

impl StatusCode {
    /// The 32-bit status code as defined by OPC UA Part 6.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Good => 0x0000_0000,
            Self::BadInternalError => 0x8002_0000,
            Self::BadNodeIdUnknown => 0x8034_0000,
            Self::BadNotReadable => 0x803A_0000,
            Self::BadNotWritable => 0x803B_0000,
            Self::BadOutOfRange => 0x803C_0000,
            Self::BadParentNodeIdInvalid => 0x805B_0000,
            Self::BadNodeIdExists => 0x805E_0000,
            Self::BadNodeClassInvalid => 0x805F_0000,
            Self::BadBrowseNameDuplicated => 0x8061_0000,
            Self::BadTypeMismatch => 0x8074_0000,
        }
    }

    #[must_use]
    pub const fn is_good(self) -> bool {
        matches!(self, Self::Good)
    }

    /// Severity bits `10` mark a bad status.
    #[must_use]
    pub const fn is_bad(self) -> bool {
        self.code() & 0xC000_0000 == 0x8000_0000
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?} (0x{:08X})", self.code())
    }
}
