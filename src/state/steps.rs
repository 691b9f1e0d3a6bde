//! Conversation steps and the transition table
//!
//! Raw user input is first classified against the current step into a
//! [`StepInput`]. The pair (step, input) then selects an [`Action`] and the
//! step to move to when that action succeeds.

use std::fmt;
use serde::{Deserialize, Serialize};
use crate::models::Tone;
use crate::utils::errors::{NegotiatorError, Result};
use crate::utils::helpers::{looks_like_email, parse_price};

/// Steps of the negotiation conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationState {
    Initial,
    Product,
    Price,
    Tone,
    Negotiating,
    Email,
}

impl ConversationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Initial => "initial",
            ConversationState::Product => "product",
            ConversationState::Price => "price",
            ConversationState::Tone => "tone",
            ConversationState::Negotiating => "negotiating",
            ConversationState::Email => "email",
        }
    }

    /// Hint shown next to the input line
    pub fn input_hint(&self) -> &'static str {
        match self {
            ConversationState::Initial => "What would you like to negotiate for?",
            ConversationState::Product => "Enter the product name...",
            ConversationState::Price => "Enter the current asking price...",
            ConversationState::Tone => "Polite, Friendly, or Assertive?",
            ConversationState::Negotiating => "Type your message...",
            ConversationState::Email => "Enter your email address...",
        }
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User input after validation against the current step
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    /// Any input; only its presence matters
    Trigger,
    ProductName(String),
    Price(f64),
    InvalidPrice,
    Tone(Tone),
    InvalidTone,
    EmailAddress(String),
    Restart,
    Unrecognized,
}

/// Work to perform for a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Greet,
    StoreProduct(String),
    StorePrice(f64),
    RejectPrice,
    StoreTone(Tone),
    RejectTone,
    Negotiate,
    SendEmail(String),
    Restart,
    RepromptEmail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub action: Action,
    /// Step to move to once the action succeeds
    pub next: ConversationState,
}

/// Validate raw input for a step. `input` is expected to be trimmed.
pub fn classify(state: ConversationState, input: &str) -> StepInput {
    match state {
        ConversationState::Initial | ConversationState::Negotiating => StepInput::Trigger,
        ConversationState::Product => StepInput::ProductName(input.to_string()),
        ConversationState::Price => match parse_price(input) {
            Some(price) if price > 0.0 => StepInput::Price(price),
            _ => StepInput::InvalidPrice,
        },
        ConversationState::Tone => match input.parse::<Tone>() {
            Ok(tone) => StepInput::Tone(tone),
            Err(_) => StepInput::InvalidTone,
        },
        ConversationState::Email => {
            let lowered = input.to_lowercase();
            if looks_like_email(input) {
                StepInput::EmailAddress(input.to_string())
            } else if lowered.contains("new") || lowered.contains("start") {
                StepInput::Restart
            } else {
                StepInput::Unrecognized
            }
        }
    }
}

/// Look up the transition for a step and validated input
pub fn transition(state: ConversationState, input: StepInput) -> Result<Transition> {
    use ConversationState as S;

    let (action, next) = match (state, input) {
        (S::Initial, StepInput::Trigger) => (Action::Greet, S::Product),
        (S::Product, StepInput::ProductName(name)) => (Action::StoreProduct(name), S::Price),
        (S::Price, StepInput::Price(price)) => (Action::StorePrice(price), S::Tone),
        (S::Price, StepInput::InvalidPrice) => (Action::RejectPrice, S::Price),
        (S::Tone, StepInput::Tone(tone)) => (Action::StoreTone(tone), S::Negotiating),
        (S::Tone, StepInput::InvalidTone) => (Action::RejectTone, S::Tone),
        (S::Negotiating, StepInput::Trigger) => (Action::Negotiate, S::Email),
        (S::Email, StepInput::EmailAddress(address)) => (Action::SendEmail(address), S::Email),
        (S::Email, StepInput::Restart) => (Action::Restart, S::Initial),
        (S::Email, StepInput::Unrecognized) => (Action::RepromptEmail, S::Email),
        (state, input) => {
            return Err(NegotiatorError::InvalidStateTransition {
                from: state.to_string(),
                to: format!("{:?}", input),
            });
        }
    };

    Ok(Transition { action, next })
}
