use crate::error::{ProvisionError, ProvisionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use uamachine_types::Identifier;

/// Configuration for the provisioned machine.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// URI of the vendor namespace that owns the machine's nodes.
    pub namespace_uri: String,
    /// Browse name of the machine object in the Machines folder.
    pub machine_name: String,
    /// Value written to `Identification/Manufacturer`.
    pub manufacturer: String,
    /// Value written to `Identification/Model`; left empty when unset.
    pub model: Option<String>,
    /// Browse name of the device object under Objects.
    pub device_name: String,
    /// Counter tick interval (ms).
    pub tick_interval_ms: u64,
    pub counter_initial: f64,
    /// Added to the counter on every tick; must be positive.
    pub counter_step: f64,
    pub setpoint_initial: f64,
    /// Hex-encoded opaque identifier of the setpoint variable.
    pub setpoint_node_id: String,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            namespace_uri: "http://mynewmachinenamespace/UA".to_string(),
            machine_name: "MyMachine".to_string(),
            manufacturer: "Manufacturer".to_string(),
            model: None,
            device_name: "M1".to_string(),
            tick_interval_ms: 500,
            counter_initial: 1.0,
            counter_step: 1.0,
            setpoint_initial: 10.0,
            setpoint_node_id: "1020FFAA".to_string(),
        }
    }
}

impl MachineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> ProvisionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ProvisionResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ProvisionResult<()> {
        let names = [
            ("namespace_uri", &self.namespace_uri),
            ("machine_name", &self.machine_name),
            ("manufacturer", &self.manufacturer),
            ("device_name", &self.device_name),
        ];
        if let Some((field, _)) = names.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ProvisionError::InvalidConfig(format!("{field} must not be empty")));
        }
        if self.tick_interval_ms == 0 {
            return Err(ProvisionError::InvalidConfig(
                "tick_interval_ms must be non-zero".to_string(),
            ));
        }
        let numbers = [
            ("counter_initial", self.counter_initial),
            ("counter_step", self.counter_step),
            ("setpoint_initial", self.setpoint_initial),
        ];
        if let Some((field, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ProvisionError::InvalidConfig(format!("{field} must be finite")));
        }
        if self.counter_step <= 0.0 {
            return Err(ProvisionError::InvalidConfig(
                "counter_step must be positive".to_string(),
            ));
        }
        self.setpoint_identifier()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The setpoint's explicit identifier within the vendor namespace.
    pub fn setpoint_identifier(&self) -> ProvisionResult<Identifier> {
        if self.setpoint_node_id.is_empty() {
            return Err(ProvisionError::InvalidConfig(
                "setpoint_node_id must not be empty".to_string(),
            ));
        }
        Ok(Identifier::opaque_from_hex(&self.setpoint_node_id)?)
    }
}
