//! Display formatting for hit metadata.

use chrono::DateTime;

/// Binary unit suffixes, smallest first.
const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];

/// Formats a byte count with binary units: `500`, `1K`, `1.5K`, `2.25M`.
///
/// Values are rounded to two decimals and trailing zeros are dropped.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return bytes.to_string();
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while round_hundredths(value) >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    let number = format!("{value:.2}");
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{number}{}", UNITS[unit])
}

/// Rounds to two decimals, as displayed.
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a Unix timestamp (seconds) as `Month DD, YYYY` in UTC.
///
/// Returns an empty string for timestamps chrono cannot represent.
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%B %d, %Y").to_string())
        .unwrap_or_default()
}
