use std::io::Write;
use std::time::Duration;
use uamachine_provision::{MachineConfig, ProvisionError};
use uamachine_types::Identifier;

#[test]
fn defaults_match_reference_machine() {
    let config = MachineConfig::default();
    assert_eq!(config.namespace_uri, "http://mynewmachinenamespace/UA");
    assert_eq!(config.machine_name, "MyMachine");
    assert_eq!(config.device_name, "M1");
    assert_eq!(config.tick_interval(), Duration::from_millis(500));
    assert_eq!(config.counter_initial, 1.0);
    assert_eq!(config.setpoint_initial, 10.0);
    assert!(config.validate().is_ok());
}

#[test]
fn setpoint_identifier_is_opaque() {
    let id = MachineConfig::default().setpoint_identifier().unwrap();
    assert_eq!(id, Identifier::Opaque(vec![0x10, 0x20, 0xFF, 0xAA]));
}

#[test]
fn partial_json_keeps_defaults() {
    let config = MachineConfig::from_json_str(r#"{"machine_name": "Press7", "tick_interval_ms": 250}"#)
        .unwrap();
    assert_eq!(config.machine_name, "Press7");
    assert_eq!(config.tick_interval_ms, 250);
    assert_eq!(config.device_name, "M1");
}

#[test]
fn empty_json_is_default() {
    let config = MachineConfig::from_json_str("{}").unwrap();
    pretty_assertions::assert_eq!(config, MachineConfig::default());
}

#[test]
fn malformed_json_is_serialization_error() {
    let err = MachineConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, ProvisionError::Serialization(_)));
}

#[test]
fn zero_interval_is_invalid() {
    let err = MachineConfig::from_json_str(r#"{"tick_interval_ms": 0}"#).unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidConfig(_)));
}

#[test]
fn non_positive_counter_step_is_invalid() {
    for step in [0.0, -1.0] {
        let config = MachineConfig {
            counter_step: step,
            ..MachineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ProvisionError::InvalidConfig(ref m) if m.contains("counter_step")));
    }
    let err = MachineConfig::from_json_str(r#"{"counter_step": -0.5}"#).unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidConfig(_)));
}

#[test]
fn blank_name_is_invalid() {
    let err = MachineConfig::from_json_str(r#"{"device_name": "  "}"#).unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidConfig(ref m) if m.contains("device_name")));
}

#[test]
fn bad_setpoint_hex_is_invalid() {
    let err = MachineConfig::from_json_str(r#"{"setpoint_node_id": "XYZ"}"#).unwrap_err();
    assert!(matches!(err, ProvisionError::Identifier(_)));
    let err = MachineConfig::from_json_str(r#"{"setpoint_node_id": ""}"#).unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidConfig(_)));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"manufacturer": "ACME", "model": "X-200"}}"#).unwrap();
    let config = MachineConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.manufacturer, "ACME");
    assert_eq!(config.model.as_deref(), Some("X-200"));
}

#[test]
fn missing_file_is_io_error() {
    let err = MachineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ProvisionError::Io(_)));
}
