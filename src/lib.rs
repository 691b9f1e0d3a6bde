//! Negotiator
//!
//! A conversational assistant that walks a user through a price negotiation:
//! it collects the product, asking price and tone, asks a negotiation backend
//! for a market analysis and a generated message, and can have that message
//! delivered by email.

#![allow(non_snake_case)]

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod handlers;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{NegotiatorError, Result};

// Re-export main components for easy access
pub use services::{BackendClient, NegotiationApi};
pub use state::{ChatController, ConversationState, NegotiationSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
