//! Card rendering
//!
//! Two targets: HTML fragments for the web page and plain text for the terminal.
//! Both show the same placeholders for missing profile fields.

pub mod html;
pub mod text;

use crate::models::DevCard;

/// Placeholder for a value the profile does not have
pub const NOT_AVAILABLE: &str = "N/A";

/// Contributions as shown on the card
pub fn contributions_label(card: &DevCard) -> String {
    card.contributions
        .map(|c| c.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Account creation date, e.g. `Mar 14, 2015`
pub fn joined_label(card: &DevCard) -> String {
    card.profile.created_at.format("%b %-d, %Y").to_string()
}

/// Whole-number percentage, rounded
pub fn percent_label(percent: f64) -> String {
    format!("{}%", percent.round() as u64)
}
