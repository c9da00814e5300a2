//! Integration tests for trellis-config

use std::fs;
use trellis_config::*;
use trellis_log::{Format, Level};

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trellis.toml");
    fs::write(
        &path,
        r#"
        [logging]
        level = "warn"
        format = "compact"

        [connector]
        default_scheme = "https"
        "#,
    )
    .unwrap();

    let settings = EngineSettings::load(&path).unwrap();
    assert_eq!(settings.logging.level().unwrap(), Level::Warn);
    assert_eq!(settings.logging.format, "compact");
    assert!(settings.connector.extract_security);
    assert_eq!(settings.call_options().default_scheme, "https");
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trellis.json");
    fs::write(&path, r#"{"connector": {"extract_security": false}}"#).unwrap();

    let settings = EngineSettings::load(&path).unwrap();
    assert!(!settings.call_options().extract_security);
}

#[test]
fn test_load_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(
        &path,
        "TRELLIS_LOG_LEVEL=trace\nTRELLIS_EXTRACT_SECURITY=false\nUNRELATED=1\n",
    )
    .unwrap();

    let settings = EngineSettings::load(&path).unwrap();
    assert_eq!(settings.logging.level().unwrap(), Level::Trace);
    assert!(!settings.connector.extract_security);
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("absent.toml");
    assert!(matches!(EngineSettings::load(&missing), Err(ConfigError::LoadError(_))));

    let unsupported = dir.path().join("trellis.yaml");
    fs::write(&unsupported, "logging: {}").unwrap();
    assert!(EngineSettings::load(&unsupported).is_err());

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[logging\nlevel=").unwrap();
    assert!(matches!(EngineSettings::load(&broken), Err(ConfigError::ParseError(_))));
}

#[test]
fn test_apply_logging() {
    let settings = EngineSettings::from_value(serde_json::json!({
        "logging": { "level": "error" }
    }))
    .unwrap();

    settings.apply_logging().unwrap();
    assert_eq!(trellis_log::current_level(), Level::Error);
    assert!(!trellis_log::is_level_enabled(Level::Warn));
    assert_eq!(trellis_log::current_format(), Format::Json);

    let settings = EngineSettings::from_value(serde_json::json!({
        "logging": { "level": "debug", "format": "pretty" }
    }))
    .unwrap();

    settings.apply_logging().unwrap();
    assert_eq!(trellis_log::current_level(), Level::Debug);
    assert_eq!(trellis_log::current_format(), Format::Pretty);
}
