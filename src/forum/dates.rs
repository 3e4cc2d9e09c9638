//! Display date labels.
//!
//! Topics store their creation date as the label shown in the UI ("May 8, 2025"), not as a
//! timestamp. Ordering by recency therefore has to parse labels back into instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-only label formats accepted when ordering by recency.
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d %B %Y"];

/// Parse a creation label into a comparable instant.
///
/// Returns `None` for labels in no known format; callers order those as oldest.
pub fn parse_created_at(label: &str) -> Option<NaiveDateTime> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(label) {
        return Some(instant.naive_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(label, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Label for a topic or reply created now.
pub fn today_label() -> String {
    label_for(Utc::now())
}

pub fn label_for(instant: DateTime<Utc>) -> String {
    instant.format("%b %-d, %Y").to_string()
}
