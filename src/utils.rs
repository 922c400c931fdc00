// Utility functions
use chrono::{DateTime, NaiveDate};

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Unix seconds at UTC midnight of `date`.
pub fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Calendar date of a unix timestamp shifted by `utc_offset` seconds.
pub fn local_date(timestamp: i64, utc_offset: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp.checked_add(utc_offset)?, 0).map(|dt| dt.date_naive())
}

/// Formats a percentage with two decimals, e.g. `21.00%`.
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}
