use std::fmt;
use uamachine_types::{StatusCode, Variant};

/// Read accessor: returns the current value on every external read.
pub type ReadFn = Box<dyn Fn() -> Variant + Send + Sync>;

/// Write accessor: validates an externally submitted value, applies it and
/// reports the outcome. Must leave its state untouched on failure.
pub type WriteFn = Box<dyn Fn(&Variant) -> StatusCode + Send + Sync>;

/// Where a variable's value comes from.
pub enum ValueSource {
    /// A stored value, replaced with `AddressSpace::set_value_from_source`.
    Static(Variant),
    /// Live accessors. Without a write accessor the variable is read-only.
    Bound { read: ReadFn, write: Option<WriteFn> },
}

impl ValueSource {
    /// A read-only live source.
    pub fn getter(read: impl Fn() -> Variant + Send + Sync + 'static) -> Self {
        Self::Bound {
            read: Box::new(read),
            write: None,
        }
    }

    /// A read/write live source.
    pub fn accessor(
        read: impl Fn() -> Variant + Send + Sync + 'static,
        write: impl Fn(&Variant) -> StatusCode + Send + Sync + 'static,
    ) -> Self {
        Self::Bound {
            read: Box::new(read),
            write: Some(Box::new(write)),
        }
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }

    /// True only for bound sources that carry a write accessor.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(self, Self::Bound { write: Some(_), .. })
    }
}

impl Default for ValueSource {
    fn default() -> Self {
        Self::Static(Variant::Empty)
    }
}

impl From<Variant> for ValueSource {
    fn from(value: Variant) -> Self {
        Self::Static(value)
    }
}

impl fmt::Debug for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(v) => f.debug_tuple("Static").field(v).finish(),
            Self::Bound { write, .. } => f
                .debug_struct("Bound")
                .field("writable", &write.is_some())
                .finish_non_exhaustive(),
        }
    }
}
