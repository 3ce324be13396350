//! Core type definitions for uamachine.
//!
//! This crate defines the protocol-agnostic building blocks shared by the
//! address space and the provisioning layer:
//! - [`NodeId`] addresses (namespace index + numeric/string/guid/opaque identifier)
//! - [`QualifiedName`] browse names and [`LocalizedText`] display strings
//! - [`Variant`] tagged values and their declared [`DataType`]
//! - [`StatusCode`] outcome codes returned from reads and writes
//!
//! Nothing in here knows about nodes, references or type templates; those
//! belong to `uamachine-space`.

mod node_id;
mod status;
mod text;
mod variant;

pub use node_id::{Identifier, NodeId};
pub use status::StatusCode;
pub use text::{LocalizedText, QualifiedName};
pub use variant::{DataType, Variant};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid byte string: {0}")]
    InvalidByteString(#[from] hex::FromHexError),

    #[error("invalid node id: {0}")]
    InvalidNodeId(String),
}
