//! State management module
//!
//! This module handles conversation state and negotiation context

pub mod context;
pub mod replies;
pub mod session;
pub mod steps;

// Re-export commonly used state components
pub use context::{NegotiationContext, NegotiationOutcome, NegotiationBrief};
pub use session::{NegotiationSession, ChatController, Submission, Rejection, FollowUp};
pub use steps::{ConversationState, StepInput, Action, Transition};
