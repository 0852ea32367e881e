//! Date-parameter canonicalization for the read endpoints.

use chrono::{DateTime, NaiveDate, Utc};

/// Fallback formats attempted for free-form input, tried in order.
const FALLBACK_FORMATS: &[&str] = &["%Y/%m/%d", "%d-%m-%Y", "%B %d, %Y", "%d %B %Y"];

/// Canonicalize a free-form date parameter to `YYYY-MM-DD`.
///
/// `YYYY-MM-DD` input passes through; other common formats are normalized.
/// Unparseable input falls back to the current UTC date rather than
/// erroring.
pub fn canonicalize_date(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return datetime.date_naive().format("%Y-%m-%d").to_string();
    }

    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format("%Y-%m-%d").to_string();
        }
    }

    today_utc()
}

/// The current UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
