//! The provisioning pass for the vendor machine.

use crate::binder;
use crate::catalog::resolve_machinery;
use crate::cell::StateCell;
use crate::config::MachineConfig;
use crate::error::{ProvisionError, ProvisionResult};
use crate::ticker::{Ticker, TickerHandle};
use tracing::info;
use uamachine_space::{ids, AddressSpace, InstantiateSpec, ObjectSpec, VariableSpec};
use uamachine_types::{DataType, LocalizedText, NodeId, Variant};

/// Browse name of the read-only counter variable.
pub const COUNTER_NAME: &str = "MyVariable1";
/// Browse name of the read/write setpoint variable.
pub const SETPOINT_NAME: &str = "MyVariable2";

/// Nodes created by [`provision_machine`] and the ticker driving the counter.
#[derive(Debug)]
pub struct ProvisionedMachine {
    pub vendor_namespace: u16,
    pub machine: NodeId,
    pub identification: NodeId,
    pub components: NodeId,
    pub device: NodeId,
    pub counter: NodeId,
    pub setpoint: NodeId,
    pub ticker: TickerHandle,
}

/// Builds the vendor machine into `space`.
///
/// The Machinery catalog must already be loaded. The pass creates, in order:
/// the machine object in the Machines folder, its `Identification` (with the
/// optional `Model`) and `Components`, the device object under Objects, and
/// the device's counter and setpoint variables. Must run inside a tokio
/// runtime because the counter ticker is spawned here.
pub fn provision_machine(
    space: &mut AddressSpace,
    config: &MachineConfig,
) -> ProvisionResult<ProvisionedMachine> {
    config.validate()?;
    let machinery = resolve_machinery(space)?;
    let ns = space.register_namespace(&config.namespace_uri)?;
    info!("Provisioning {} in ns={}", config.machine_name, ns);

    let machine = space.add_object(ObjectSpec::new(
        ns,
        &config.machine_name,
        machinery.machines_folder.clone(),
    ))?;

    let identification = space.instantiate(
        &machinery.identification_type,
        InstantiateSpec::new(ns, "Identification", machine.clone()).with_optionals(["Model"]),
    )?;
    let manufacturer = required_child(space, &identification, "Manufacturer")?;
    space.set_value_from_source(
        &manufacturer,
        Variant::LocalizedText(LocalizedText::plain(&config.manufacturer)),
    )?;
    if let Some(model) = &config.model {
        let model_node = required_child(space, &identification, "Model")?;
        space.set_value_from_source(&model_node, Variant::LocalizedText(LocalizedText::plain(model)))?;
    }

    let components = space.instantiate(
        &machinery.components_type,
        InstantiateSpec::new(ns, "Components", machine.clone()),
    )?;

    let device = space.add_object(ObjectSpec::new(ns, &config.device_name, ids::OBJECTS_FOLDER))?;

    let counter_cell = StateCell::new(config.counter_initial);
    let counter = space.add_variable(
        VariableSpec::new(ns, COUNTER_NAME, device.clone(), DataType::Double)
            .with_source(binder::read_only(counter_cell.clone())),
    )?;

    let setpoint = space.add_variable(
        VariableSpec::new(ns, SETPOINT_NAME, device.clone(), DataType::Double)
            .with_node_id(config.setpoint_identifier()?)
            .with_source(binder::read_write(StateCell::new(config.setpoint_initial))),
    )?;

    let ticker = Ticker::spawn(config.tick_interval(), counter_cell, config.counter_step)?;

    info!(
        "Provisioned {} ({}) with device {} ({})",
        config.machine_name, machine, config.device_name, device
    );
    Ok(ProvisionedMachine {
        vendor_namespace: ns,
        machine,
        identification,
        components,
        device,
        counter,
        setpoint,
        ticker,
    })
}

fn required_child(space: &AddressSpace, parent: &NodeId, name: &str) -> ProvisionResult<NodeId> {
    space
        .child_by_name(parent, name)
        .ok_or_else(|| ProvisionError::MissingChild {
            parent: parent.clone(),
            name: name.to_string(),
        })
}
