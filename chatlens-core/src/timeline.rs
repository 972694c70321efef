//! Sentiment timeline pivot.
//!
//! Converts the flat per-message event stream of an analysis report into the
//! two-track, chronologically merged series the sentiment chart plots: one
//! row per distinct instant, one column per sender track. Pure functions
//! only; the pivot is cheap at transcript sizes and is recomputed per render
//! instead of cached.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::format;
use crate::types::{ChatEvent, Sender, SentimentLevel};

/// One row of the pivoted sentiment series.
///
/// A `None` track means that sender did not speak at this instant. The pivot
/// never fills that in with a default ordinal or interpolates between rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    /// The distinct instant this row represents
    pub timestamp: DateTime<Utc>,
    /// Display label for the time axis
    pub label: String,
    /// Customer track value, if the customer spoke at this instant
    pub customer: Option<SentimentLevel>,
    /// Agent track value, if the agent spoke at this instant
    pub agent: Option<SentimentLevel>,
}

/// Pivot an arrival-ordered event stream into a chronological two-track series.
///
/// No ordering precondition on the input. Rows are keyed by the parsed
/// instant (exact value, no rounding) and emitted sorted ascending by that
/// instant, so the output length always equals the number of distinct
/// instants in the input. When several events of the *same* sender share an
/// instant, the last one in input order wins.
///
/// Fails with [`Error::MalformedTimestamp`] if any event timestamp does not
/// parse. Skipping the event instead would silently break the chart's
/// continuity, which is worse than a visible failure on this display-only
/// path.
pub fn build(events: &[ChatEvent]) -> Result<Vec<TimelinePoint>> {
    // (customer, agent) per instant; BTreeMap keeps rows sorted by instant.
    let mut rows: BTreeMap<DateTime<Utc>, (Option<SentimentLevel>, Option<SentimentLevel>)> =
        BTreeMap::new();

    for event in events {
        let instant = parse_timestamp(&event.timestamp)?;
        let row = rows.entry(instant).or_default();
        match event.sender {
            Sender::Customer => row.0 = Some(event.sentiment.level()),
            Sender::Agent => row.1 = Some(event.sentiment.level()),
        }
    }

    Ok(rows
        .into_iter()
        .map(|(timestamp, (customer, agent))| TimelinePoint {
            timestamp,
            label: format::format_timestamp(timestamp),
            customer,
            agent,
        })
        .collect())
}

/// Parse an event timestamp (RFC 3339, `Z` suffix included) to UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::MalformedTimestamp {
            value: value.to_string(),
        })
}
