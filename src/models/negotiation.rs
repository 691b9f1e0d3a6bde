//! Negotiation models shared with the backend API

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::NegotiatorError;

/// Rhetorical style of the generated negotiation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Polite,
    Friendly,
    Assertive,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Polite, Tone::Friendly, Tone::Assertive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Polite => "polite",
            Tone::Friendly => "friendly",
            Tone::Assertive => "assertive",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = NegotiatorError;

    /// Case-insensitive match against the closed set of tones
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == lowered)
            .ok_or_else(|| NegotiatorError::InvalidInput(format!("Unknown tone: {}", s)))
    }
}

/// Channel the backend uses to deliver a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Telegram,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationRequest {
    pub product_name: String,
    pub current_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_price: Option<f64>,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorListing {
    pub title: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationResponse {
    pub message: String,
    pub suggested_price: f64,
    #[serde(default)]
    pub competitor_prices: Vec<CompetitorListing>,
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// Body returned by the send endpoint; only `success` has a fixed meaning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
