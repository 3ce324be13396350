//! Tagged values.
//!
//! A [`Variant`] carries its own [`DataType`] tag, so a reader always knows
//! how to interpret the payload. Variable nodes declare a data type and the
//! address space checks values against it.

use crate::LocalizedText;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared data type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Int32,
    UInt16,
    UInt32,
    Int64,
    Float,
    Double,
    String,
    LocalizedText,
    ByteString,
    DateTime,
}

impl DataType {
    /// Whether values of this type are numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::UInt16 | Self::UInt32 | Self::Int64 | Self::Float | Self::Double
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::String => "String",
            Self::LocalizedText => "LocalizedText",
            Self::ByteString => "ByteString",
            Self::DateTime => "DateTime",
        };
        f.write_str(name)
    }
}

/// A value tagged with its data type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Empty,
    Boolean(bool),
    Int32(i32),
    UInt16(u16),
    UInt32(u32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    LocalizedText(LocalizedText),
    ByteString(Vec<u8>),
    /// Milliseconds since the Unix epoch.
    DateTime(i64),
}

impl Variant {
    /// Returns the type tag, or `None` for [`Variant::Empty`].
    #[must_use]
    pub const fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Self::Empty => return None,
            Self::Boolean(_) => DataType::Boolean,
            Self::Int32(_) => DataType::Int32,
            Self::UInt16(_) => DataType::UInt16,
            Self::UInt32(_) => DataType::UInt32,
            Self::Int64(_) => DataType::Int64,
            Self::Float(_) => DataType::Float,
            Self::Double(_) => DataType::Double,
            Self::String(_) => DataType::String,
            Self::LocalizedText(_) => DataType::LocalizedText,
            Self::ByteString(_) => DataType::ByteString,
            Self::DateTime(_) => DataType::DateTime,
        })
    }

    /// True when this value may be stored in a variable of `data_type`.
    /// An empty value fits every type.
    #[must_use]
    pub fn fits(&self, data_type: DataType) -> bool {
        self.data_type().is_none_or(|t| t == data_type)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Widens any numeric payload to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Int32(v) => Some(f64::from(v)),
            Self::UInt16(v) => Some(f64::from(v)),
            Self::UInt32(v) => Some(f64::from(v)),
            Self::Int64(v) => Some(v as f64),
            Self::Float(v) => Some(f64::from(v)),
            Self::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the text payload of a `String` or `LocalizedText` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::LocalizedText(t) => Some(&t.text),
            _ => None,
        }
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for Variant {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<LocalizedText> for Variant {
    fn from(v: LocalizedText) -> Self {
        Self::LocalizedText(v)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("<empty>"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::UInt16(v) => write!(f, "{v}"),
            Self::UInt32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::LocalizedText(v) => write!(f, "{:?}", v.text),
            Self::ByteString(v) => write!(f, "0x{}", hex::encode_upper(v)),
            Self::DateTime(v) => write!(f, "{v}ms"),
        }
    }
}
