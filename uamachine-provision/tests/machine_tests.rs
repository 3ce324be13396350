use std::time::Duration;
use uamachine_machinery::{load_machinery, MACHINES_FOLDER_ID};
use uamachine_provision::{
    provision_machine, resolve_machinery, MachineConfig, ProvisionError, COUNTER_NAME,
    SETPOINT_NAME,
};
use uamachine_space::{ids, AddressSpace, ReferenceKind};
use uamachine_types::{DataType, LocalizedText, NodeId, StatusCode, Variant};

fn loaded_space() -> AddressSpace {
    let mut space = AddressSpace::new();
    load_machinery(&mut space).unwrap();
    space
}

fn names(space: &AddressSpace, node: &NodeId) -> Vec<String> {
    space
        .browse(node)
        .iter()
        .map(|n| n.browse_name().name.clone())
        .collect()
}

// ── Catalog resolution ───────────────────────────────────────────

#[test]
fn resolve_after_load() {
    let space = loaded_space();
    let nodes = resolve_machinery(&space).unwrap();
    assert_eq!(nodes.namespace, 1);
    assert_eq!(nodes.machines_folder, NodeId::numeric(1, MACHINES_FOLDER_ID));
}

#[test]
fn resolve_without_namespace_fails() {
    let space = AddressSpace::new();
    let err = resolve_machinery(&space).unwrap_err();
    assert!(matches!(err, ProvisionError::UnknownNamespace(_)));
}

#[test]
fn resolve_with_namespace_but_no_nodes_fails() {
    let mut space = AddressSpace::new();
    space
        .register_namespace(uamachine_machinery::MACHINERY_NAMESPACE_URI)
        .unwrap();
    let err = resolve_machinery(&space).unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::Resolution { what: "Machines folder", .. }
    ));
}

#[tokio::test]
async fn provision_aborts_when_catalog_missing() {
    let mut space = AddressSpace::new();
    let before = space.len();
    let err = provision_machine(&mut space, &MachineConfig::default()).unwrap_err();
    assert!(matches!(err, ProvisionError::UnknownNamespace(_)));
    assert_eq!(space.len(), before);
}

// ── Structure ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn machine_is_organized_by_machines_folder() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let folder = resolve_machinery(&space).unwrap().machines_folder;

    let machine = space.find_node(&m.machine).unwrap();
    assert_eq!(machine.browse_name().name, "MyMachine");
    assert_eq!(machine.parent(), Some((&folder, ReferenceKind::Organizes)));
    assert_eq!(names(&space, &m.machine), vec!["Identification", "Components"]);
    assert_eq!(m.vendor_namespace, 2);
    assert_eq!(
        space.namespace_uri(m.vendor_namespace),
        Some("http://mynewmachinenamespace/UA")
    );
}

#[tokio::test(start_paused = true)]
async fn identification_has_mandatory_children_and_model() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    assert_eq!(
        names(&space, &m.identification),
        vec!["Manufacturer", "ProductInstanceUri", "SerialNumber", "Model"]
    );
    assert!(space.child_by_name(&m.identification, "ProductCode").is_none());
}

#[tokio::test(start_paused = true)]
async fn manufacturer_reads_back_exact_text() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let manufacturer = space.child_by_name(&m.identification, "Manufacturer").unwrap();
    assert_eq!(
        space.read_value(&manufacturer),
        Ok(Variant::LocalizedText(LocalizedText::plain("Manufacturer")))
    );
    let model = space.child_by_name(&m.identification, "Model").unwrap();
    assert_eq!(space.read_value(&model), Ok(Variant::Empty));
}

#[tokio::test(start_paused = true)]
async fn configured_model_is_written() {
    let mut space = loaded_space();
    let config = MachineConfig {
        model: Some("X-200".to_string()),
        ..MachineConfig::default()
    };
    let m = provision_machine(&mut space, &config).unwrap();
    let model = space.child_by_name(&m.identification, "Model").unwrap();
    assert_eq!(
        space.read_value(&model),
        Ok(Variant::LocalizedText(LocalizedText::plain("X-200")))
    );
}

#[tokio::test(start_paused = true)]
async fn components_is_empty_instance() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let components = space.find_node(&m.components).unwrap();
    assert_eq!(components.browse_name().name, "Components");
    assert!(components.children().is_empty());
}

#[tokio::test(start_paused = true)]
async fn device_holds_both_variables() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let device = space.find_node(&m.device).unwrap();
    assert_eq!(device.browse_name().name, "M1");
    assert_eq!(
        device.parent(),
        Some((&ids::OBJECTS_FOLDER, ReferenceKind::Organizes))
    );
    assert_eq!(names(&space, &m.device), vec![COUNTER_NAME, SETPOINT_NAME]);
    for var in [&m.counter, &m.setpoint] {
        let node = space.find_node(var).unwrap();
        assert_eq!(node.data_type(), Some(DataType::Double));
        assert_eq!(node.parent(), Some((&m.device, ReferenceKind::HasComponent)));
    }
}

#[tokio::test(start_paused = true)]
async fn setpoint_uses_explicit_opaque_id() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    assert_eq!(
        m.setpoint,
        NodeId::opaque(m.vendor_namespace, vec![0x10, 0x20, 0xFF, 0xAA])
    );
    assert_eq!(m.setpoint.to_string(), "ns=2;b=1020FFAA");
}

#[tokio::test(start_paused = true)]
async fn provisioning_twice_collides() {
    let mut space = loaded_space();
    let _first = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let err = provision_machine(&mut space, &MachineConfig::default()).unwrap_err();
    assert!(matches!(err, ProvisionError::Space(_)));
}

#[tokio::test]
async fn invalid_config_is_rejected_before_building() {
    let mut space = loaded_space();
    let before = space.len();
    let config = MachineConfig {
        tick_interval_ms: 0,
        ..MachineConfig::default()
    };
    let err = provision_machine(&mut space, &config).unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidConfig(_)));
    assert_eq!(space.len(), before);
}

// ── Live values ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn counter_reaches_five_after_two_seconds() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    assert_eq!(space.read_value(&m.counter), Ok(Variant::Double(1.0)));

    tokio::time::sleep(Duration::from_millis(2001)).await;
    assert_eq!(space.read_value(&m.counter), Ok(Variant::Double(5.0)));
    assert_eq!(m.ticker.stop().await, 4);
}

#[tokio::test(start_paused = true)]
async fn counter_is_read_only() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    assert_eq!(
        space.write_value(&m.counter, Variant::Double(100.0)),
        StatusCode::BadNotWritable
    );
    assert_eq!(space.read_value(&m.counter), Ok(Variant::Double(1.0)));
}

#[tokio::test(start_paused = true)]
async fn setpoint_write_then_read() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    assert_eq!(space.read_value(&m.setpoint), Ok(Variant::Double(10.0)));

    assert_eq!(space.write_value(&m.setpoint, Variant::from("23.5")), StatusCode::Good);
    assert_eq!(space.read_value(&m.setpoint), Ok(Variant::Double(23.5)));

    let status = space.write_value(&m.setpoint, Variant::from("not-a-number"));
    assert_eq!(status, StatusCode::BadTypeMismatch);
    assert!(status.is_bad());
    assert_eq!(space.read_value(&m.setpoint), Ok(Variant::Double(23.5)));
}

#[tokio::test(start_paused = true)]
async fn setpoint_is_unaffected_by_ticker() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(space.read_value(&m.setpoint), Ok(Variant::Double(10.0)));
}

#[tokio::test(start_paused = true)]
async fn manufacturer_is_not_externally_writable() {
    let mut space = loaded_space();
    let m = provision_machine(&mut space, &MachineConfig::default()).unwrap();
    let manufacturer = space.child_by_name(&m.identification, "Manufacturer").unwrap();
    assert_eq!(
        space.write_value(&manufacturer, Variant::LocalizedText("Other".into())),
        StatusCode::BadNotWritable
    );
}
