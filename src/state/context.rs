//! Negotiation context management
//!
//! This module tracks the facts collected during one negotiation: the
//! product, its asking price, the chosen tone and, once the backend has
//! answered, the negotiation outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::{CompetitorListing, NegotiationResponse, Tone};

/// What the backend produced for a negotiation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationOutcome {
    pub suggested_price: f64,
    pub competitors: Vec<CompetitorListing>,
    pub message: String,
}

impl From<NegotiationResponse> for NegotiationOutcome {
    fn from(response: NegotiationResponse) -> Self {
        Self {
            suggested_price: response.suggested_price,
            competitors: response.competitor_prices,
            message: response.message,
        }
    }
}

/// Everything needed to request a negotiation message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationBrief<'a> {
    pub product_name: &'a str,
    pub asking_price: f64,
    pub tone: Tone,
}

/// Session-scoped negotiation facts, built up one step at a time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationContext {
    pub product_name: Option<String>,
    pub asking_price: Option<f64>,
    pub tone: Option<Tone>,
    pub outcome: Option<NegotiationOutcome>,
    pub updated_at: DateTime<Utc>,
}

impl Default for NegotiationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NegotiationContext {
    pub fn new() -> Self {
        Self {
            product_name: None,
            asking_price: None,
            tone: None,
            outcome: None,
            updated_at: Utc::now(),
        }
    }

    /// Start collecting a new negotiation for `product_name`
    pub fn set_product(&mut self, product_name: &str) {
        *self = Self::new();
        self.product_name = Some(product_name.to_string());
    }

    pub fn set_price(&mut self, asking_price: f64) {
        self.asking_price = Some(asking_price);
        self.updated_at = Utc::now();
    }

    pub fn set_tone(&mut self, tone: Tone) {
        self.tone = Some(tone);
        self.updated_at = Utc::now();
    }

    pub fn set_outcome(&mut self, outcome: NegotiationOutcome) {
        self.outcome = Some(outcome);
        self.updated_at = Utc::now();
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// The request inputs, if product, a positive price and tone are all set
    pub fn brief(&self) -> Option<NegotiationBrief<'_>> {
        let product_name = self.product_name.as_deref().filter(|name| !name.is_empty())?;
        let asking_price = self.asking_price.filter(|price| *price > 0.0)?;
        let tone = self.tone?;

        Some(NegotiationBrief {
            product_name,
            asking_price,
            tone,
        })
    }

    pub fn generated_message(&self) -> Option<&str> {
        self.outcome.as_ref().map(|outcome| outcome.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.asking_price.is_none()
            && self.tone.is_none()
            && self.outcome.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_requires_all_fields() {
        let mut context = NegotiationContext::new();
        assert!(context.brief().is_none());

        context.set_product("iPhone 13");
        context.set_price(450.0);
        assert!(context.brief().is_none());

        context.set_tone(Tone::Friendly);
        let brief = context.brief().unwrap();
        assert_eq!(brief.product_name, "iPhone 13");
        assert_eq!(brief.asking_price, 450.0);
        assert_eq!(brief.tone, Tone::Friendly);
    }

    #[test]
    fn test_brief_rejects_non_positive_price() {
        let mut context = NegotiationContext::new();
        context.set_product("Desk");
        context.set_price(0.0);
        context.set_tone(Tone::Polite);
        assert!(context.brief().is_none());
    }

    #[test]
    fn test_set_product_starts_fresh() {
        let mut context = NegotiationContext::new();
        context.set_product("Old");
        context.set_price(10.0);
        context.set_product("New");

        assert_eq!(context.product_name.as_deref(), Some("New"));
        assert!(context.asking_price.is_none());
    }

    #[test]
    fn test_clear() {
        let mut context = NegotiationContext::new();
        context.set_product("Chair");
        context.set_outcome(NegotiationOutcome {
            suggested_price: 20.0,
            competitors: vec![],
            message: "Hi".to_string(),
        });
        assert_eq!(context.generated_message(), Some("Hi"));

        context.clear();
        assert!(context.is_empty());
        assert!(context.generated_message().is_none());
    }
}
