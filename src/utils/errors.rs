//! Error handling for Negotiator
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for Negotiator application
#[derive(Error, Debug)]
pub enum NegotiatorError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Negotiation backend specific errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend timeout")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend service unavailable")]
    ServiceUnavailable,

    #[error("Failed to generate negotiation message")]
    NegotiationUnsuccessful,

    #[error("Message delivery rejected: {0}")]
    DeliveryRejected(String),
}

/// Result type alias for Negotiator operations
pub type Result<T> = std::result::Result<T, NegotiatorError>;

/// Result type alias for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

impl From<config::ConfigError> for NegotiatorError {
    fn from(err: config::ConfigError) -> Self {
        NegotiatorError::Config(err.to_string())
    }
}

impl NegotiatorError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            NegotiatorError::Backend(_) => true,
            NegotiatorError::Config(_) => false,
            NegotiatorError::InvalidStateTransition { .. } => true,
            NegotiatorError::Http(_) => true,
            NegotiatorError::Serialization(_) => false,
            NegotiatorError::Io(_) => true,
            NegotiatorError::UrlParse(_) => false,
            NegotiatorError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            NegotiatorError::Config(_) => ErrorSeverity::Critical,
            NegotiatorError::UrlParse(_) => ErrorSeverity::Critical,
            NegotiatorError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            NegotiatorError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
