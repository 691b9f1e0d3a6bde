//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod negotiation;
pub mod transcript;

// Re-export commonly used models
pub use negotiation::{
    Tone, DeliveryMethod, NegotiationRequest, NegotiationResponse, CompetitorListing,
    SendMessageRequest, SendMessageResponse,
};
pub use transcript::{Role, EntryBody, TranscriptEntry, TranscriptEvent, PendingEntry, Transcript};
