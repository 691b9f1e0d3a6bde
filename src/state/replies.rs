//! Assistant reply texts

use crate::state::context::{NegotiationBrief, NegotiationOutcome};
use crate::utils::helpers::{format_amount, truncate_chars};

pub const WELCOME: &str = "Welcome to AI Negotiator! I'm powered by real market data and AI. What would you like to negotiate for today?";
pub const TYPING: &str = "...";
pub const ANALYZING: &str = "Analyzing... Please wait.";
pub const GREETING: &str = "Hello! I'm your AI negotiation assistant. I'll help you get the best price using real market data. What product are you looking to buy?";
pub const ASK_TONE: &str = "Which tone would you like for your negotiation message? (Polite, Friendly, Assertive)";
pub const INVALID_PRICE: &str = "Please enter a valid price amount (e.g., $150 or 150)";
pub const INVALID_TONE: &str = "Please select one of these tones: Polite, Friendly, or Assertive.";
pub const MISSING_DETAILS: &str = "Sorry, some negotiation details are missing. Please start over.";
pub const NEGOTIATION_FAILED: &str = "Sorry, I couldn't complete the market analysis. Please check your backend and send any message to try again.";
pub const EMAIL_FAILED: &str = "Sorry, I couldn't send the email. Please check your backend and try again.";
pub const RESTART: &str = "Great! What would you like to negotiate for next?";
pub const REPROMPT_EMAIL: &str = "Please provide your email address or say 'new' to start a new negotiation.";
pub const GENERIC_ERROR: &str = "Sorry, an error occurred. Please check your backend and try again.";
pub const RESET_NOTICE: &str = "Ready for a new negotiation. Send any message to begin.";
pub const MESSAGE_UNAVAILABLE: &str = "Negotiation message not available";

pub fn product_acknowledged(product_name: &str) -> String {
    format!(
        "Great! I'll help you negotiate the best price for \"{}\". What's the current asking price for this product?",
        product_name
    )
}

pub fn tone_acknowledged(tone: &str) -> String {
    format!(
        "Great! I'll use a {} tone. Let me analyze the market and generate your negotiation message...",
        tone
    )
}

pub fn email_sent(address: &str) -> String {
    format!(
        "🎉 Email sent successfully to {}! Your AI-generated negotiation message has been delivered including market data, competitor price analysis, and strategy.",
        address
    )
}

/// Render the market analysis shown once the backend has answered
pub fn analysis_summary(
    brief: &NegotiationBrief<'_>,
    outcome: &NegotiationOutcome,
    title_limit: usize,
) -> String {
    let savings = brief.asking_price - outcome.suggested_price;

    let competitors = if outcome.competitors.is_empty() {
        "No competitor listings found.".to_string()
    } else {
        outcome
            .competitors
            .iter()
            .enumerate()
            .map(|(index, listing)| {
                format!(
                    "{}. {} - ${}",
                    index + 1,
                    truncate_chars(&listing.title, title_limit),
                    format_amount(listing.price)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "🎯 Real Market Analysis Complete!\n\
         \n\
         Product: {product}\n\
         Listed Price: ${listed}\n\
         AI Suggested Price: ${suggested}\n\
         Potential Savings: ${savings:.2}\n\
         \n\
         📊 Competitor Data Found:\n\
         {competitors}\n\
         \n\
         🤖 AI-Generated Negotiation Message:\n\
         \"{message}\"\n\
         \n\
         Would you like me to send this negotiation message to your email? Just provide your email address!",
        product = brief.product_name,
        listed = format_amount(brief.asking_price),
        suggested = format_amount(outcome.suggested_price),
        savings = savings,
        competitors = competitors,
        message = outcome.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompetitorListing, Tone};

    fn brief() -> NegotiationBrief<'static> {
        NegotiationBrief {
            product_name: "iPhone 13",
            asking_price: 450.0,
            tone: Tone::Friendly,
        }
    }

    #[test]
    fn test_summary_layout() {
        let outcome = NegotiationOutcome {
            suggested_price: 400.0,
            competitors: vec![
                CompetitorListing { title: "iPhone 13 128GB Midnight".to_string(), price: 410.0 },
                CompetitorListing { title: "x".repeat(80), price: 399.99 },
            ],
            message: "Hi! Would you take $400?".to_string(),
        };

        let summary = analysis_summary(&brief(), &outcome, 60);
        let expected = format!(
            "🎯 Real Market Analysis Complete!\n\
             \n\
             Product: iPhone 13\n\
             Listed Price: $450\n\
             AI Suggested Price: $400\n\
             Potential Savings: $50.00\n\
             \n\
             📊 Competitor Data Found:\n\
             1. iPhone 13 128GB Midnight - $410\n\
             2. {}... - $399.99\n\
             \n\
             🤖 AI-Generated Negotiation Message:\n\
             \"Hi! Would you take $400?\"\n\
             \n\
             Would you like me to send this negotiation message to your email? Just provide your email address!",
            "x".repeat(60)
        );
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_without_competitors() {
        let outcome = NegotiationOutcome {
            suggested_price: 425.5,
            competitors: vec![],
            message: "Offer".to_string(),
        };

        let summary = analysis_summary(&brief(), &outcome, 60);
        assert!(summary.contains("Potential Savings: $24.50"));
        assert!(summary.contains("No competitor listings found."));
    }
}
