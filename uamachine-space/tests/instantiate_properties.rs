//! Instantiation invariants over arbitrary optional subsets.

use proptest::prelude::*;
use std::collections::BTreeSet;
use uamachine_space::{ids, AddressSpace, InstantiateSpec, ObjectTypeTemplate};
use uamachine_types::{DataType, NodeId};

const MANDATORY: [&str; 3] = ["Manufacturer", "ProductInstanceUri", "SerialNumber"];
const OPTIONAL: [&str; 6] = [
    "Model",
    "ProductCode",
    "HardwareRevision",
    "SoftwareRevision",
    "AssetId",
    "Location",
];

fn template(ns: u16) -> ObjectTypeTemplate {
    let mut t = ObjectTypeTemplate::new(NodeId::numeric(ns, 1012), "IdentificationType");
    for name in MANDATORY {
        t = t.mandatory_property(name, DataType::String);
    }
    for name in OPTIONAL {
        t = t.optional_property(name, DataType::String);
    }
    t
}

proptest! {
    #[test]
    fn children_equal_mandatory_union_requested(
        mask in prop::collection::vec(any::<bool>(), OPTIONAL.len()),
    ) {
        let mut space = AddressSpace::new();
        let ns = space.register_namespace("urn:prop").unwrap();
        let type_id = space.add_object_type(template(ns), &ids::BASE_OBJECT_TYPE).unwrap();

        let requested: Vec<&str> = OPTIONAL
            .iter()
            .zip(&mask)
            .filter(|(_, on)| **on)
            .map(|(name, _)| *name)
            .collect();
        let instance = space
            .instantiate(
                &type_id,
                InstantiateSpec::new(ns, "Identification", ids::OBJECTS_FOLDER)
                    .with_optionals(requested.iter().copied()),
            )
            .unwrap();

        let actual: BTreeSet<String> = space
            .browse(&instance)
            .iter()
            .map(|n| n.browse_name().name.clone())
            .collect();
        let expected: BTreeSet<String> = MANDATORY
            .iter()
            .chain(requested.iter())
            .map(|s| s.to_string())
            .collect();
        prop_assert_eq!(&actual, &expected);
        for name in MANDATORY {
            prop_assert!(space.child_by_name(&instance, name).is_some());
        }
    }
}
