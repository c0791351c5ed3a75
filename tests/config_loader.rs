use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use termbridge::bridge::{BridgeOptions, MouseTracking};
use termbridge::config::{BridgeConfig, ConfigError};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

/// Test that BridgeConfig::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = BridgeConfig::default();
    assert_eq!(config.poll_interval_ms, 100);
    assert_eq!(config.mouse_tracking, MouseTracking::Cell);
    assert!(config.buffers.input_limit_bytes.is_none());
    assert!(config.buffers.output_limit_bytes.is_none());
    assert_eq!(config.logging.filter, "info");
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = BridgeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, BridgeConfig::default());
}

#[test]
fn test_full_config_round_trips_into_options() {
    let file = write_config(
        r#"
poll_interval_ms = 25
mouse_tracking = "all"

[buffers]
input_limit_bytes = 4096
output_limit_bytes = 65536

[logging]
filter = "termbridge=debug"
"#,
    );

    let config = BridgeConfig::load_from(file.path()).unwrap();
    assert_eq!(config.logging.filter, "termbridge=debug");

    let options = BridgeOptions::from(&config);
    assert_eq!(options.poll_interval, Duration::from_millis(25));
    assert_eq!(options.mouse_tracking, MouseTracking::All);
    assert_eq!(options.input_limit, Some(4096));
    assert_eq!(options.output_limit, Some(65536));
}

#[test]
fn test_parse_error_names_the_file() {
    let file = write_config("poll_interval_ms = \"fast\"");
    match BridgeConfig::load_from(file.path()).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert_eq!(path, file.path()),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_unknown_tracking_mode_is_a_parse_error() {
    let file = write_config("mouse_tracking = \"pixels\"");
    assert!(matches!(
        BridgeConfig::load_from(file.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_validation_runs_on_load() {
    let file = write_config("poll_interval_ms = 60000");
    match BridgeConfig::load_from(file.path()).unwrap_err() {
        ConfigError::ValidationError { message } => {
            assert!(message.contains("poll_interval_ms"));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}
