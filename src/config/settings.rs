//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendConfig,
    pub conversation: ConversationConfig,
    pub logging: LoggingConfig,
}

/// Negotiation backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub api_url: String,
    /// Unset means requests wait for the backend indefinitely
    pub timeout_seconds: Option<u64>,
    pub user_agent: String,
}

/// Conversation pacing and rendering configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversationConfig {
    pub greeting_delay_ms: u64,
    pub acknowledge_delay_ms: u64,
    pub reset_delay_seconds: u64,
    pub competitor_title_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for daily rolling log files
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from a specific configuration file (extension optional),
    /// overridden by `NEGOTIATOR_<SECTION>__<KEY>` environment variables
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("NEGOTIATOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::NegotiatorError> {
        super::validation::validate_settings(self)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl ConversationConfig {
    pub fn greeting_delay(&self) -> Duration {
        Duration::from_millis(self.greeting_delay_ms)
    }

    pub fn acknowledge_delay(&self) -> Duration {
        Duration::from_millis(self.acknowledge_delay_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_seconds)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            timeout_seconds: None,
            user_agent: format!("Negotiator/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting_delay_ms: 500,
            acknowledge_delay_ms: 400,
            reset_delay_seconds: 3,
            competitor_title_limit: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            json: false,
        }
    }
}
