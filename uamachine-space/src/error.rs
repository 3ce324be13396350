//! Error types for address space construction.

use thiserror::Error;
use uamachine_types::{DataType, NodeId, StatusCode};

/// Result type for address space operations.
pub type SpaceResult<T> = Result<T, SpaceError>;

/// Errors raised while building the node graph.
///
/// Runtime reads and writes never produce these; they return a
/// [`StatusCode`] instead.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// The parent a node should be attached to does not exist.
    #[error("parent node not found: {0}")]
    ParentNotFound(NodeId),

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("node id already in use: {0}")]
    NodeIdExists(NodeId),

    #[error("browse name {name:?} already used under {parent}")]
    DuplicateBrowseName { parent: NodeId, name: String },

    #[error("namespace index {0} is not registered")]
    UnknownNamespace(u16),

    #[error("namespace table is full")]
    NamespaceTableFull,

    #[error("not an object type: {0}")]
    NotAnObjectType(NodeId),

    /// An optional child was requested that the type does not declare.
    #[error("type {type_id} declares no optional child {name:?}")]
    UnknownOptional { type_id: NodeId, name: String },

    #[error("not a variable: {0}")]
    NotAVariable(NodeId),

    /// Static values and live accessors are mutually exclusive.
    #[error("variable {0} is bound to a live accessor")]
    BoundValue(NodeId),

    #[error("value for {node_id} has type {actual:?}, expected {expected}")]
    TypeMismatch {
        node_id: NodeId,
        expected: DataType,
        actual: Option<DataType>,
    },

    #[error("type instantiation nested deeper than {0} levels")]
    InstanceTooDeep(usize),
}

impl SpaceError {
    /// The status code a server would report for this failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ParentNotFound(_) => StatusCode::BadParentNodeIdInvalid,
            Self::NodeNotFound(_) | Self::UnknownNamespace(_) => StatusCode::BadNodeIdUnknown,
            Self::NodeIdExists(_) => StatusCode::BadNodeIdExists,
            Self::DuplicateBrowseName { .. } => StatusCode::BadBrowseNameDuplicated,
            Self::NotAnObjectType(_) | Self::NotAVariable(_) => StatusCode::BadNodeClassInvalid,
            Self::BoundValue(_) => StatusCode::BadNotWritable,
            Self::TypeMismatch { .. } => StatusCode::BadTypeMismatch,
            Self::UnknownOptional { .. } => StatusCode::BadOutOfRange,
            Self::NamespaceTableFull | Self::InstanceTooDeep(_) => StatusCode::BadInternalError,
        }
    }
}
