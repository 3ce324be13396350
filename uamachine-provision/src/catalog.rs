//! Resolution of the Machinery catalog nodes the pass depends on.

use crate::error::{ProvisionError, ProvisionResult};
use tracing::debug;
use uamachine_machinery::{
    MACHINERY_NAMESPACE_URI, MACHINES_FOLDER_ID, MACHINE_COMPONENTS_TYPE_ID,
    MACHINE_IDENTIFICATION_TYPE_ID,
};
use uamachine_space::{AddressSpace, NodeClass};
use uamachine_types::NodeId;

/// Resolved Machinery nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineryNodes {
    pub namespace: u16,
    pub machines_folder: NodeId,
    pub identification_type: NodeId,
    pub components_type: NodeId,
}

/// Resolves the Machinery namespace by URI and looks up the folder and types
/// by their fixed identifiers. Any miss is fatal to provisioning.
pub fn resolve_machinery(space: &AddressSpace) -> ProvisionResult<MachineryNodes> {
    let namespace = space
        .namespace_index(MACHINERY_NAMESPACE_URI)
        .ok_or_else(|| ProvisionError::UnknownNamespace(MACHINERY_NAMESPACE_URI.to_string()))?;

    let machines_folder = NodeId::numeric(namespace, MACHINES_FOLDER_ID);
    match space.find_node(&machines_folder) {
        Some(node) if node.class() == NodeClass::Object => {}
        _ => {
            return Err(ProvisionError::Resolution {
                what: "Machines folder",
                node_id: machines_folder,
            });
        }
    }

    let object_type = |id: u32, what: &'static str| {
        let node_id = NodeId::numeric(namespace, id);
        match space.find_object_type(&node_id) {
            Some(_) => Ok(node_id),
            None => Err(ProvisionError::Resolution { what, node_id }),
        }
    };
    let identification_type =
        object_type(MACHINE_IDENTIFICATION_TYPE_ID, "MachineIdentificationType")?;
    let components_type = object_type(MACHINE_COMPONENTS_TYPE_ID, "MachineComponentsType")?;

    debug!("Resolved Machinery catalog in ns={}", namespace);
    Ok(MachineryNodes {
        namespace,
        machines_folder,
        identification_type,
        components_type,
    })
}
