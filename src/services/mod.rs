//! Services module
//!
//! This module contains clients for the external services the assistant uses

pub mod backend;

// Re-export commonly used services
pub use backend::{BackendClient, NegotiationApi};
