//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Negotiator application. Log output goes to stderr so that stdout
//! stays reserved for the chat transcript.

use tracing::{info, warn, error, debug};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{NegotiatorError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender and must be kept alive for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| NegotiatorError::Config(format!("Invalid log filter: {}", e)))?;

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match &config.file_path {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "negotiator.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| NegotiatorError::Config(format!("Failed to install logger: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a conversation state transition
pub fn log_transition(from: &str, to: &str, action: &str) {
    if from == to {
        debug!(state = from, action = action, "Conversation state unchanged");
    } else {
        info!(from = from, to = to, action = action, "Conversation state changed");
    }
}

/// Log input that failed validation for the current step
pub fn log_validation_failure(state: &str, reason: &str) {
    debug!(state = state, reason = reason, "User input rejected");
}

/// Log a completed backend call
pub fn log_backend_call(operation: &str, duration_ms: u64, success: bool) {
    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Backend call completed"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Backend call failed"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}
