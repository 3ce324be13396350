//! Process-local state behind live-bound variables.

use parking_lot::Mutex;
use std::sync::Arc;
use uamachine_types::{StatusCode, Variant};

/// A mutable scalar shared by the accessors and timer of one variable.
///
/// Clones share the same slot. Hand clones only to the closures created for
/// that variable; other code should go through the address space.
#[derive(Debug, Default)]
pub struct StateCell<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Copy> StateCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    pub fn get(&self) -> T {
        *self.inner.lock()
    }

    pub fn set(&self, value: T) {
        *self.inner.lock() = value;
    }

    /// Applies `f` under the lock and returns the new value.
    pub fn update(&self, f: impl FnOnce(T) -> T) -> T {
        let mut guard = self.inner.lock();
        *guard = f(*guard);
        *guard
    }
}

/// Scalar types a [`StateCell`] can expose as a variable value.
pub trait CellValue: Copy + Send + Sync + 'static {
    fn to_variant(self) -> Variant;

    /// Converts an externally submitted payload. Text payloads are parsed and
    /// integer payloads are widened. Floating-point payloads never narrow to
    /// an integer type.
    fn from_payload(payload: &Variant) -> Result<Self, StatusCode>;
}

impl CellValue for f64 {
    fn to_variant(self) -> Variant {
        Variant::Double(self)
    }

    fn from_payload(payload: &Variant) -> Result<Self, StatusCode> {
        let value = match payload {
            Variant::String(_) | Variant::LocalizedText(_) => payload
                .as_text()
                .unwrap_or_default()
                .trim()
                .parse::<f64>()
                .map_err(|_| StatusCode::BadTypeMismatch)?,
            other => other.as_f64().ok_or(StatusCode::BadTypeMismatch)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(StatusCode::BadOutOfRange)
        }
    }
}

impl CellValue for i64 {
    fn to_variant(self) -> Variant {
        Variant::Int64(self)
    }

    fn from_payload(payload: &Variant) -> Result<Self, StatusCode> {
        match *payload {
            Variant::Int32(v) => Ok(i64::from(v)),
            Variant::UInt16(v) => Ok(i64::from(v)),
            Variant::UInt32(v) => Ok(i64::from(v)),
            Variant::Int64(v) => Ok(v),
            Variant::String(_) | Variant::LocalizedText(_) => payload
                .as_text()
                .unwrap_or_default()
                .trim()
                .parse::<i64>()
                .map_err(|_| StatusCode::BadTypeMismatch),
            _ => Err(StatusCode::BadTypeMismatch),
        }
    }
}
