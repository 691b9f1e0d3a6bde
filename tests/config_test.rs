//! Configuration loading tests
//!
//! These tests load settings from real files and environment variables.
//! They run serially because they mutate the process environment.

use std::env;
use std::io::Write;
use serial_test::serial;
use tempfile::{Builder, TempDir};
use Negotiator::config::{BackendConfig, Settings};
use Negotiator::utils::errors::NegotiatorError;

const OVERRIDE_VARS: &[&str] = &[
    "NEGOTIATOR_BACKEND__API_URL",
    "NEGOTIATOR_BACKEND__TIMEOUT_SECONDS",
    "NEGOTIATOR_CONVERSATION__RESET_DELAY_SECONDS",
    "NEGOTIATOR_LOGGING__LEVEL",
];

fn clear_overrides() {
    for name in OVERRIDE_VARS {
        env::remove_var(name);
    }
}

fn write_config(contents: &str) -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let mut file = Builder::new()
        .prefix("negotiator")
        .suffix(".toml")
        .tempfile_in(dir.path())
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    let (_, path) = file.keep().unwrap();
    (dir, path.to_string_lossy().into_owned())
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_overrides();

    let settings = Settings::from_file("/nonexistent/negotiator-config").unwrap();
    assert_eq!(settings.backend.api_url, "http://localhost:8000");
    assert_eq!(settings.backend.timeout_seconds, None);
    assert_eq!(settings.conversation.reset_delay_seconds, 3);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_file_values_are_loaded() {
    clear_overrides();

    let mut written = Settings::default();
    written.backend = BackendConfig {
        api_url: "https://negotiate.example.com/v1".to_string(),
        timeout_seconds: Some(20),
        ..BackendConfig::default()
    };
    written.conversation.competitor_title_limit = 40;
    let (_dir, path) = write_config(&toml::to_string(&written).unwrap());

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.backend.api_url, "https://negotiate.example.com/v1");
    assert_eq!(settings.backend.timeout_seconds, Some(20));
    assert_eq!(settings.conversation.competitor_title_limit, 40);
    assert_eq!(settings.logging.level, "info");
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_overrides();
    let (_dir, path) = write_config(
        r#"
        [backend]
        api_url = "http://from-file:8000"

        [logging]
        level = "warn"
        "#,
    );

    env::set_var("NEGOTIATOR_BACKEND__API_URL", "http://from-env:9000");
    env::set_var("NEGOTIATOR_BACKEND__TIMEOUT_SECONDS", "12");
    env::set_var("NEGOTIATOR_CONVERSATION__RESET_DELAY_SECONDS", "5");

    let result = Settings::from_file(&path);
    clear_overrides();
    let settings = result.unwrap();

    assert_eq!(settings.backend.api_url, "http://from-env:9000");
    assert_eq!(settings.backend.timeout_seconds, Some(12));
    assert_eq!(settings.conversation.reset_delay_seconds, 5);
    assert_eq!(settings.logging.level, "warn");
}

#[test]
#[serial]
fn test_invalid_backend_url_fails_validation() {
    clear_overrides();
    env::set_var("NEGOTIATOR_BACKEND__API_URL", "ftp://negotiate.example.com");

    let result = Settings::from_file("/nonexistent/negotiator-config");
    clear_overrides();
    let settings = result.unwrap();

    assert!(matches!(settings.validate(), Err(NegotiatorError::Config(_))));
}

#[test]
#[serial]
fn test_unknown_log_level_fails_validation() {
    clear_overrides();
    let (_dir, path) = write_config("[logging]\nlevel = \"chatty\"\n");

    let settings = Settings::from_file(&path).unwrap();
    assert!(matches!(settings.validate(), Err(NegotiatorError::Config(_))));
}
