//! The Machinery companion catalog.
//!
//! Holds the fixed identifiers of the Machinery namespace and a loader that
//! installs the part of its nodeset this workspace uses into an
//! [`AddressSpace`]: the `Machines` folder, `MachineIdentificationType` and
//! `MachineComponentsType`.
//!
//! Provisioning code never calls [`load_machinery`] itself. It only resolves
//! the namespace and looks the nodes up by the constants below; loading is
//! the hosting server's job.

use tracing::info;
use uamachine_space::{ids, AddressSpace, ObjectSpec, ObjectTypeTemplate, SpaceResult};
use uamachine_types::{DataType, Identifier, NodeId};

/// Namespace URI of the Machinery companion specification.
pub const MACHINERY_NAMESPACE_URI: &str = "http://opcfoundation.org/UA/Machinery/";

/// `Machines` folder, entry point for all machine instances.
pub const MACHINES_FOLDER_ID: u32 = 1001;
/// `MachineComponentsType`.
pub const MACHINE_COMPONENTS_TYPE_ID: u32 = 1006;
/// `MachineIdentificationType`.
pub const MACHINE_IDENTIFICATION_TYPE_ID: u32 = 1012;

/// Children every identification instance carries.
pub const IDENTIFICATION_MANDATORY: [(&str, DataType); 3] = [
    ("Manufacturer", DataType::LocalizedText),
    ("ProductInstanceUri", DataType::String),
    ("SerialNumber", DataType::String),
];

/// Children an identification instance carries on request.
pub const IDENTIFICATION_OPTIONAL: [(&str, DataType); 12] = [
    ("Model", DataType::LocalizedText),
    ("ProductCode", DataType::String),
    ("HardwareRevision", DataType::String),
    ("SoftwareRevision", DataType::String),
    ("DeviceClass", DataType::String),
    ("ManufacturerUri", DataType::String),
    ("YearOfConstruction", DataType::UInt16),
    ("MonthOfConstruction", DataType::UInt16),
    ("InitialOperationDate", DataType::DateTime),
    ("AssetId", DataType::String),
    ("ComponentName", DataType::LocalizedText),
    ("Location", DataType::String),
];

/// Builds the `MachineIdentificationType` template for namespace `ns`.
pub fn machine_identification_type(ns: u16) -> ObjectTypeTemplate {
    let template = ObjectTypeTemplate::new(
        NodeId::numeric(ns, MACHINE_IDENTIFICATION_TYPE_ID),
        "MachineIdentificationType",
    );
    let template = IDENTIFICATION_MANDATORY
        .iter()
        .fold(template, |t, (name, dt)| t.mandatory_property(name, *dt));
    IDENTIFICATION_OPTIONAL
        .iter()
        .fold(template, |t, (name, dt)| t.optional_property(name, *dt))
}

/// Builds the `MachineComponentsType` template. Components are added by the
/// machine vendor, so the type declares no children of its own.
pub fn machine_components_type(ns: u16) -> ObjectTypeTemplate {
    ObjectTypeTemplate::new(
        NodeId::numeric(ns, MACHINE_COMPONENTS_TYPE_ID),
        "MachineComponentsType",
    )
}

/// Installs the Machinery namespace, folder and types. Returns the namespace
/// index. Loading twice into the same space fails with `NodeIdExists`.
pub fn load_machinery(space: &mut AddressSpace) -> SpaceResult<u16> {
    let ns = space.register_namespace(MACHINERY_NAMESPACE_URI)?;
    space.add_object(
        ObjectSpec::new(ns, "Machines", ids::OBJECTS_FOLDER)
            .with_node_id(Identifier::Numeric(MACHINES_FOLDER_ID))
            .with_type_definition(ids::FOLDER_TYPE),
    )?;
    space.add_object_type(machine_identification_type(ns), &ids::BASE_OBJECT_TYPE)?;
    space.add_object_type(machine_components_type(ns), &ids::BASE_OBJECT_TYPE)?;
    info!("Loaded Machinery catalog as ns={}", ns);
    Ok(ns)
}
