//! Machine provisioning for uamachine.
//!
//! Runs one top-down pass over an [`AddressSpace`](uamachine_space::AddressSpace):
//! 1. resolve the Machinery namespace and catalog nodes ([`resolve_machinery`])
//! 2. build the vendor machine tree from the catalog's type templates
//! 3. bind live variables to [`StateCell`]s through the [`binder`] helpers,
//!    with a cancellable [`Ticker`] driving the counter
//!
//! Failures during the pass are fatal and surface as [`ProvisionError`].
//! Failures while serving values never are; accessors answer with a
//! `StatusCode`.

pub mod binder;
mod catalog;
mod cell;
mod config;
mod error;
mod machine;
mod ticker;

pub use catalog::{resolve_machinery, MachineryNodes};
pub use cell::{CellValue, StateCell};
pub use config::MachineConfig;
pub use error::{ProvisionError, ProvisionResult};
pub use machine::{provision_machine, ProvisionedMachine, COUNTER_NAME, SETPOINT_NAME};
pub use ticker::{Ticker, TickerHandle};
