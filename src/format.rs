//! Date presentation helpers for card content.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

/// Fallback text for unparseable dates; rendering never fails.
pub const INVALID_DATE: &str = "Invalid date";

/// Formats a timestamp string as a long-form date, e.g. `January 3, 2025`.
///
/// Accepts RFC 3339 timestamps and plain `YYYY-MM-DD` dates, the two shapes
/// the upstream feeds carry. Empty input yields an empty string; anything
/// unparseable yields [`INVALID_DATE`].
pub fn format_date(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    match parse_date(input) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => {
            warn!(input, "invalid date format");
            INVALID_DATE.to_string()
        }
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    parse_timestamp(input).map(|dt| dt.date_naive())
}

fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative-time label for a timestamp, measured against `now`.
///
/// Buckets: under a minute is `Just now`; minutes carry a plural suffix;
/// hours, days, months, and years are always plural.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 3_600;
    const DAY: i64 = 86_400;
    const MONTH: i64 = 2_592_000;
    const YEAR: i64 = 31_536_000;

    let seconds = (now - then).num_seconds();
    if seconds < MINUTE {
        return "Just now".to_string();
    }
    if seconds < HOUR {
        let minutes = seconds / MINUTE;
        let suffix = if minutes == 1 { "" } else { "s" };
        return format!("{minutes} minute{suffix} ago");
    }
    if seconds < DAY {
        return format!("{} hours ago", seconds / HOUR);
    }
    if seconds < MONTH {
        return format!("{} days ago", seconds / DAY);
    }
    if seconds < YEAR {
        return format!("{} months ago", seconds / MONTH);
    }
    format!("{} years ago", seconds / YEAR)
}

/// String-input variant of [`relative_time`] against the current clock.
/// Empty or unparseable input degrades to an empty string.
pub fn relative_time_since(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    match parse_timestamp(input) {
        Some(then) => relative_time(then, Utc::now()),
        None => {
            warn!(input, "invalid date for relative time");
            String::new()
        }
    }
}
