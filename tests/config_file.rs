//! Integration tests for configuration file loading
//!
//! Covers the full path file → parse → validate, the default-file fallback,
//! and the generated template.

use bedrock_inventory::cli::generate_config_template;
use bedrock_inventory::client::{ClientConfig, RetryMode};
use bedrock_inventory::config::Config;
use bedrock_inventory::error::AppError;
use std::fs;
use std::io::Write;
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

/// Helper to create a temporary config file with given TOML content
fn create_temp_config(toml_content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(toml_content.as_bytes())
        .expect("Failed to write temp file");
    temp_file.flush().expect("Failed to flush temp file");
    temp_file
}

#[test]
fn test_generated_template_loads_as_default_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("bedrock-inventory.toml");
    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config = Config::from_file(&config_path).expect("template should load");

    assert_eq!(config.client_config(), ClientConfig::default());
    assert_eq!(config.connectivity_hostname(), "bedrock.us-east-1.amazonaws.com");
    assert_eq!(config.resolve_timeout(), Duration::from_secs(5));
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_file = create_temp_config(
        r#"
[service]
region = "eu-west-1"

[retry]
mode = "adaptive"
"#,
    );

    let config = Config::from_file(temp_file.path()).expect("partial config should load");
    let client = config.client_config();

    assert_eq!(client.region(), "eu-west-1");
    assert_eq!(client.endpoint_url(), "https://bedrock.eu-west-1.amazonaws.com");
    assert_eq!(client.connect_timeout(), Duration::from_secs(5));
    assert_eq!(client.read_timeout(), Duration::from_secs(10));
    assert_eq!(client.retry().max_attempts, 3);
    assert_eq!(client.retry().mode, RetryMode::Adaptive);
}

#[test]
fn test_missing_explicit_file_is_a_read_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("nope.toml");
    let default_path = temp_dir.path().join("bedrock-inventory.toml");

    let result = Config::load(Some(missing.as_path()), &default_path);

    match result {
        Err(AppError::ConfigFileRead { path, .. }) => assert!(path.contains("nope.toml")),
        other => panic!("expected ConfigFileRead, got {:?}", other),
    }
}

#[test]
fn test_missing_default_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let default_path = temp_dir.path().join("bedrock-inventory.toml");

    let config = Config::load(None, &default_path).expect("defaults are used");

    assert_eq!(config.client_config(), ClientConfig::default());
}

#[test]
fn test_present_default_file_is_used() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let default_path = temp_dir.path().join("bedrock-inventory.toml");
    fs::write(&default_path, "[service]\nregion = \"ap-south-1\"\n").expect("write config");

    let config = Config::load(None, &default_path).expect("default file should load");

    assert_eq!(config.service.region, "ap-south-1");
}

#[test]
fn test_malformed_toml_reports_path() {
    let temp_file = create_temp_config("[service\nregion = ");

    let err = Config::from_file(temp_file.path()).unwrap_err();

    assert!(matches!(err, AppError::ConfigParseFailed { .. }), "got: {:?}", err);
    let path_display = temp_file.path().display().to_string();
    assert!(err.to_string().contains(&path_display), "got: {}", err);
}

#[test]
fn test_invalid_values_report_validation_failure() {
    let temp_file = create_temp_config("[retry]\nmax_attempts = 0\n");

    let err = Config::from_file(temp_file.path()).unwrap_err();

    match err {
        AppError::ConfigValidationFailed { reason, .. } => {
            assert!(reason.contains("max_attempts"), "reason: {}", reason)
        }
        other => panic!("expected ConfigValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_region_override_after_load_is_validated() {
    let config = Config::default().with_region("");
    assert!(config.validate().is_err());
}
