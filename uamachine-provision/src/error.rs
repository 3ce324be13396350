//! Error types for the provisioning pass.

use thiserror::Error;
use uamachine_space::SpaceError;
use uamachine_types::NodeId;

/// Result type for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Errors that abort provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A namespace the pass depends on is not registered.
    #[error("namespace not registered: {0}")]
    UnknownNamespace(String),

    /// A catalog node could not be resolved.
    #[error("cannot resolve {what} at {node_id}")]
    Resolution { what: &'static str, node_id: NodeId },

    /// A mandatory child is missing from an instantiated object.
    #[error("{parent} has no child {name:?}")]
    MissingChild { parent: NodeId, name: String },

    /// Node graph construction failed.
    #[error("address space error: {0}")]
    Space(#[from] SpaceError),

    #[error("invalid identifier: {0}")]
    Identifier(#[from] uamachine_types::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Periodic tasks need a running tokio runtime.
    #[error("no tokio runtime available to spawn the ticker")]
    NoRuntime,
}
