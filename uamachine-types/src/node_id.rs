//! Node identifiers.
//!
//! A [`NodeId`] is a namespace index plus an [`Identifier`]. The textual form
//! follows the usual OPC UA notation: `ns=2;i=1001`, `ns=1;s=Pump`,
//! `ns=1;g=<uuid>` and `ns=1;b=<hex>`. The `ns=` prefix is omitted for
//! namespace 0.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The namespace-scoped part of a [`NodeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Uuid),
    /// Opaque byte string, written as hex in the textual form.
    Opaque(Vec<u8>),
}

impl Identifier {
    /// Parses an opaque identifier from a hex string (e.g. `"1020FFAA"`).
    pub fn opaque_from_hex(s: &str) -> Result<Self, Error> {
        Ok(Self::Opaque(hex::decode(s)?))
    }

    /// Returns the numeric value, if this is a numeric identifier.
    #[must_use]
    pub fn as_numeric(&self) -> Option<u32> {
        match self {
            Self::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "i={n}"),
            Self::String(s) => write!(f, "s={s}"),
            Self::Guid(g) => write!(f, "g={g}"),
            Self::Opaque(b) => write!(f, "b={}", hex::encode_upper(b)),
        }
    }
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidNodeId(s.to_string()))?;
        match kind {
            "i" => value
                .parse::<u32>()
                .map(Self::Numeric)
                .map_err(|_| Error::InvalidNodeId(s.to_string())),
            "s" if !value.is_empty() => Ok(Self::String(value.to_string())),
            "g" => Ok(Self::Guid(Uuid::parse_str(value)?)),
            "b" => Self::opaque_from_hex(value),
            _ => Err(Error::InvalidNodeId(s.to_string())),
        }
    }
}

/// Address of a node: namespace index plus identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId {
    namespace: u16,
    identifier: Identifier,
}

impl NodeId {
    /// Creates a node id from its parts.
    #[must_use]
    pub const fn new(namespace: u16, identifier: Identifier) -> Self {
        Self {
            namespace,
            identifier,
        }
    }

    /// Creates a numeric node id.
    #[must_use]
    pub const fn numeric(namespace: u16, id: u32) -> Self {
        Self::new(namespace, Identifier::Numeric(id))
    }

    /// Creates a string node id.
    #[must_use]
    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        Self::new(namespace, Identifier::String(id.into()))
    }

    /// Creates an opaque (byte string) node id.
    #[must_use]
    pub fn opaque(namespace: u16, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(namespace, Identifier::Opaque(bytes.into()))
    }

    #[must_use]
    pub const fn namespace(&self) -> u16 {
        self.namespace
    }

    #[must_use]
    pub const fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Parses a node id from its textual form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace == 0 {
            write!(f, "{}", self.identifier)
        } else {
            write!(f, "ns={};{}", self.namespace, self.identifier)
        }
    }
}

impl FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.strip_prefix("ns=") {
            Some(rest) => {
                let (ns, id) = rest
                    .split_once(';')
                    .ok_or_else(|| Error::InvalidNodeId(s.to_string()))?;
                let namespace = ns
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidNodeId(s.to_string()))?;
                Ok(Self::new(namespace, id.parse()?))
            }
            None => Ok(Self::new(0, s.parse()?)),
        }
    }
}

impl TryFrom<String> for NodeId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}
