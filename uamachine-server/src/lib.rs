//! Startup and monitoring logic for the uamachine server binary.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use uamachine_machinery::load_machinery;
use uamachine_provision::{provision_machine, MachineConfig, ProvisionedMachine};
use uamachine_space::{ids, AddressSpace};
use uamachine_types::{StatusCode, Variant};

/// Point-in-time values of the device variables.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub counter: Option<Variant>,
    pub setpoint: Option<Variant>,
    pub ticks: u64,
}

/// A provisioned address space plus the handles needed to shut it down.
pub struct MachineServer {
    space: AddressSpace,
    machine: ProvisionedMachine,
}

impl MachineServer {
    /// Loads the Machinery catalog into a fresh address space and provisions
    /// the machine. Must run inside a tokio runtime.
    pub fn start(config: &MachineConfig) -> Result<Self> {
        let mut space = AddressSpace::new();
        load_machinery(&mut space).context("Failed to load Machinery catalog")?;
        let machine =
            provision_machine(&mut space, config).context("Failed to provision machine")?;
        info!("Address space ready ({} nodes)", space.len());
        Ok(Self { space, machine })
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    pub fn machine(&self) -> &ProvisionedMachine {
        &self.machine
    }

    /// Submits an external write to the setpoint variable.
    pub fn write_setpoint(&self, value: Variant) -> StatusCode {
        self.space.write_value(&self.machine.setpoint, value)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            counter: self.space.read_value(&self.machine.counter).ok(),
            setpoint: self.space.read_value(&self.machine.setpoint).ok(),
            ticks: self.machine.ticker.ticks(),
        }
    }

    /// Renders the machine and device subtrees.
    pub fn render(&self) -> String {
        let mut out = self.space.render_tree(&self.machine.machine);
        out.push_str(&self.space.render_tree(&self.machine.device));
        out
    }

    /// Renders everything below the Objects folder.
    pub fn render_objects(&self) -> String {
        self.space.render_tree(&ids::OBJECTS_FOLDER)
    }

    /// Stops the counter ticker and returns its tick count.
    pub async fn shutdown(self) -> u64 {
        self.machine.ticker.stop().await
    }
}
