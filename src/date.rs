//! Timestamp formatting for post date lines
//!
//! The backend stores `createdAt` / `updated` as ISO 8601 strings. They are
//! shown as `October 14, 2026 at 03:05 PM`, always in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DISPLAY_FORMAT: &str = "%B %-d, %Y at %I:%M %p";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp into a UTC instant
///
/// Accepts RFC 3339, naive date-times (treated as UTC) and plain dates
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Format a backend timestamp for display
///
/// Returns `None` when the timestamp cannot be parsed.
///
/// # Examples
///
/// ```
/// use renovar_markdown::date::format_timestamp;
///
/// assert_eq!(
///     format_timestamp("2026-10-14T15:05:00Z").as_deref(),
///     Some("October 14, 2026 at 03:05 PM")
/// );
/// assert_eq!(format_timestamp("yesterday"), None);
/// ```
pub fn format_timestamp(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format(DISPLAY_FORMAT).to_string())
}
