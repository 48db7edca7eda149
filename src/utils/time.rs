use chrono::{DateTime, Utc};
use std::fmt::Write;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a Unix timestamp (seconds) for display, in UTC.
///
/// Out-of-range timestamps render as an empty string. A format string chrono
/// cannot render falls back to RFC 3339.
pub fn convert_int_to_datetime(timestamp: i64, format: &str) -> String {
    let Some(datetime) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return String::new();
    };

    let mut out = String::new();
    if write!(out, "{}", datetime.format(format)).is_err() {
        return datetime.to_rfc3339();
    }
    out
}
