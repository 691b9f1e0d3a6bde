//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::LazyLock;
use chrono::{DateTime, Utc};
use regex::Regex;
use uuid::Uuid;

static NON_PRICE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("static pattern"));

/// Generate a new UUID v4
pub fn generate_uuid() -> Uuid {
    Uuid::new_v4()
}

/// Format a timestamp for transcript display
pub fn format_clock(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%H:%M:%S").to_string()
}

/// Truncate text to at most `max_chars` characters, appending an ellipsis
/// only when something was cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Parse a price typed by a user, e.g. `$1,299.99` or `450 USD`
///
/// Everything except ASCII digits and `.` is dropped, then the longest
/// leading decimal number is read (`1.2.3` reads as `1.2`).
pub fn parse_price(input: &str) -> Option<f64> {
    let cleaned = NON_PRICE_CHARS.replace_all(input, "");

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    cleaned[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Loose email check: anything containing `@` counts as an address
pub fn looks_like_email(input: &str) -> bool {
    input.contains('@')
}

/// Format a currency amount for display: `450`, `449.99`
pub fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}
