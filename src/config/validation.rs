//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{NegotiatorError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_conversation_config(&settings.conversation)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.api_url.is_empty() {
        return Err(NegotiatorError::Config(
            "Backend API URL is required".to_string()
        ));
    }

    let url = Url::parse(&config.api_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(NegotiatorError::Config(
            format!("Backend API URL must use http or https, got: {}", url.scheme())
        ));
    }

    if config.timeout_seconds == Some(0) {
        return Err(NegotiatorError::Config(
            "Backend timeout must be greater than 0 when set".to_string()
        ));
    }

    Ok(())
}

/// Validate conversation configuration
fn validate_conversation_config(config: &super::ConversationConfig) -> Result<()> {
    if config.competitor_title_limit == 0 {
        return Err(NegotiatorError::Config(
            "Competitor title limit must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(NegotiatorError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(NegotiatorError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
