use parking_lot::Mutex;
use std::sync::Arc;
use uamachine_space::{ids, AddressSpace, ObjectSpec, ValueSource, VariableSpec};
use uamachine_types::{DataType, NodeId, StatusCode, Variant};

fn space_with_device() -> (AddressSpace, u16, NodeId) {
    let mut space = AddressSpace::new();
    let ns = space.register_namespace("urn:test:dispatch").unwrap();
    let device = space
        .add_object(ObjectSpec::new(ns, "M1", ids::OBJECTS_FOLDER))
        .unwrap();
    (space, ns, device)
}

fn shared_double(initial: f64) -> (Arc<Mutex<f64>>, ValueSource) {
    let cell = Arc::new(Mutex::new(initial));
    let (r, w) = (cell.clone(), cell.clone());
    let source = ValueSource::accessor(
        move || Variant::Double(*r.lock()),
        move |v| match v.as_f64() {
            Some(x) => {
                *w.lock() = x;
                StatusCode::Good
            }
            None => StatusCode::BadTypeMismatch,
        },
    );
    (cell, source)
}

// ── Reads ────────────────────────────────────────────────────────

#[test]
fn read_unknown_node() {
    let space = AddressSpace::new();
    assert_eq!(
        space.read_value(&NodeId::numeric(0, 12345)),
        Err(StatusCode::BadNodeIdUnknown)
    );
}

#[test]
fn read_object_is_not_readable() {
    let space = AddressSpace::new();
    assert_eq!(
        space.read_value(&ids::OBJECTS_FOLDER),
        Err(StatusCode::BadNotReadable)
    );
}

#[test]
fn read_calls_getter_each_time() {
    let (mut space, ns, device) = space_with_device();
    let (cell, source) = shared_double(1.0);
    let var = space
        .add_variable(VariableSpec::new(ns, "V", device, DataType::Double).with_source(source))
        .unwrap();

    assert_eq!(space.read_value(&var), Ok(Variant::Double(1.0)));
    *cell.lock() = 7.0;
    assert_eq!(space.read_value(&var), Ok(Variant::Double(7.0)));
}

#[test]
fn read_with_mistyped_getter_is_type_mismatch() {
    let (mut space, ns, device) = space_with_device();
    let var = space
        .add_variable(
            VariableSpec::new(ns, "V", device, DataType::Double)
                .with_source(ValueSource::getter(|| Variant::from("oops"))),
        )
        .unwrap();
    assert_eq!(space.read_value(&var), Err(StatusCode::BadTypeMismatch));
}

// ── Writes ───────────────────────────────────────────────────────

#[test]
fn write_through_accessor() {
    let (mut space, ns, device) = space_with_device();
    let (cell, source) = shared_double(10.0);
    let var = space
        .add_variable(VariableSpec::new(ns, "V", device, DataType::Double).with_source(source))
        .unwrap();

    assert_eq!(space.write_value(&var, Variant::Double(23.5)), StatusCode::Good);
    assert_eq!(*cell.lock(), 23.5);
    assert_eq!(space.read_value(&var), Ok(Variant::Double(23.5)));
}

#[test]
fn write_failure_is_reported_and_state_kept() {
    let (mut space, ns, device) = space_with_device();
    let (cell, source) = shared_double(10.0);
    let var = space
        .add_variable(VariableSpec::new(ns, "V", device, DataType::Double).with_source(source))
        .unwrap();

    assert_eq!(
        space.write_value(&var, Variant::Boolean(true)),
        StatusCode::BadTypeMismatch
    );
    assert_eq!(*cell.lock(), 10.0);
}

#[test]
fn write_to_getter_only_is_not_writable() {
    let (mut space, ns, device) = space_with_device();
    let var = space
        .add_variable(
            VariableSpec::new(ns, "V", device, DataType::Double)
                .with_source(ValueSource::getter(|| Variant::Double(1.0))),
        )
        .unwrap();
    assert_eq!(
        space.write_value(&var, Variant::Double(2.0)),
        StatusCode::BadNotWritable
    );
    assert_eq!(space.read_value(&var), Ok(Variant::Double(1.0)));
}

#[test]
fn write_to_static_variable_is_not_writable() {
    let (mut space, ns, device) = space_with_device();
    let var = space
        .add_variable(
            VariableSpec::new(ns, "V", device, DataType::Double)
                .with_source(Variant::Double(4.0).into()),
        )
        .unwrap();
    assert_eq!(
        space.write_value(&var, Variant::Double(2.0)),
        StatusCode::BadNotWritable
    );
    assert_eq!(space.read_value(&var), Ok(Variant::Double(4.0)));
}

#[test]
fn write_to_object_or_unknown() {
    let space = AddressSpace::new();
    assert_eq!(
        space.write_value(&ids::OBJECTS_FOLDER, Variant::Double(1.0)),
        StatusCode::BadNodeClassInvalid
    );
    assert_eq!(
        space.write_value(&NodeId::numeric(0, 4), Variant::Double(1.0)),
        StatusCode::BadNodeIdUnknown
    );
}

// ── Browsing ─────────────────────────────────────────────────────

#[test]
fn browse_lists_children_in_creation_order() {
    let (mut space, ns, device) = space_with_device();
    for name in ["A", "B", "C"] {
        space
            .add_variable(VariableSpec::new(ns, name, device.clone(), DataType::Double))
            .unwrap();
    }
    let names: Vec<_> = space
        .browse(&device)
        .iter()
        .map(|n| n.browse_name().name.as_str())
        .collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert!(space.browse(&NodeId::numeric(ns, 1)).is_empty());
}

#[test]
fn render_tree_shows_values() {
    let (mut space, ns, device) = space_with_device();
    space
        .add_variable(
            VariableSpec::new(ns, "Speed", device.clone(), DataType::Double)
                .with_source(Variant::Double(2.5).into()),
        )
        .unwrap();
    let rendered = space.render_tree(&device);
    let expected = format!(
        "M1 ({device}) [Object]\n  Speed (ns={ns};i=1001) = 2.5\n"
    );
    pretty_assertions::assert_eq!(rendered, expected);
}

#[test]
fn source_debug_hides_closures() {
    let source = ValueSource::getter(|| Variant::Empty);
    assert_eq!(format!("{source:?}"), "Bound { writable: false, .. }");
    assert!(source.is_bound());
    assert!(!source.is_writable());
}
