//! Live value binding.
//!
//! Turns a [`StateCell`] into a [`ValueSource`] for
//! `AddressSpace::add_variable`. The cell moves into the accessor closures;
//! nothing else keeps a handle unless the caller cloned one for a ticker.

use crate::cell::{CellValue, StateCell};
use tracing::debug;
use uamachine_space::ValueSource;
use uamachine_types::StatusCode;

/// A read-only source. External writes are rejected by the address space
/// with `BadNotWritable` because no write accessor is installed.
pub fn read_only<T: CellValue>(cell: StateCell<T>) -> ValueSource {
    ValueSource::getter(move || cell.get().to_variant())
}

/// A read/write source. The payload is validated before the cell changes,
/// so a rejected write leaves the previous value in place.
pub fn read_write<T: CellValue>(cell: StateCell<T>) -> ValueSource {
    let reader = cell.clone();
    ValueSource::accessor(
        move || reader.get().to_variant(),
        move |payload| match T::from_payload(payload) {
            Ok(value) => {
                cell.set(value);
                StatusCode::Good
            }
            Err(status) => {
                debug!("Rejected payload {}: {}", payload, status);
                status
            }
        },
    )
}
