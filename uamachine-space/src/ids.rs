//! Well-known node ids of namespace 0.

use uamachine_types::NodeId;

/// URI of the standard namespace, always at index 0.
pub const UA_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/";

pub const ROOT_FOLDER: NodeId = NodeId::numeric(0, 84);
pub const OBJECTS_FOLDER: NodeId = NodeId::numeric(0, 85);
pub const TYPES_FOLDER: NodeId = NodeId::numeric(0, 86);
pub const VIEWS_FOLDER: NodeId = NodeId::numeric(0, 87);
pub const OBJECT_TYPES_FOLDER: NodeId = NodeId::numeric(0, 88);
pub const BASE_OBJECT_TYPE: NodeId = NodeId::numeric(0, 58);
pub const FOLDER_TYPE: NodeId = NodeId::numeric(0, 61);

/// First numeric identifier handed out by the allocator in every namespace.
pub const FIRST_ALLOCATED_ID: u32 = 1000;
