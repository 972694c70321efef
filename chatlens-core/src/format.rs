//! Formatting helpers shared across views.

use chrono::{DateTime, Utc};

/// Format an instant for the chart's time axis (UTC, second precision).
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format a score to one decimal place (e.g., "7.5").
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Format a duration in seconds as "Xm Ys".
pub fn format_duration_secs(secs: i64) -> String {
    format!("{}m {}s", secs / 60, secs.rem_euclid(60))
}
