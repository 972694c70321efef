//! Core domain types for chatlens
//!
//! These types mirror the analysis service's response payload and the chart
//! model derived from it.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **ChatEvent** | One transcript message: timestamp, sender role, sentiment |
//! | **Sender** | Who wrote a message: the customer or the support agent |
//! | **Sentiment** | The classification the service attached to a message, as received on the wire |
//! | **SentimentLevel** | The three-step ordinal scale the chart plots (`negative < neutral < positive`) |
//! | **Track** | The per-sender sentiment series plotted independently on the chart |
//! | **AnalysisReport** | The full response payload: chat data, scores, feedback |
//!
//! ### Sentiment vs SentimentLevel
//!
//! The wire value [`Sentiment`] keeps unknown or missing classifications
//! distinct as [`Sentiment::Unknown`] so the fallback is a visible decision,
//! not an accidental default branch. The chart-facing [`SentimentLevel`] has
//! exactly three values; `Unknown` maps to [`SentimentLevel::Neutral`] there
//! because the chart axis has no fourth step to give it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Senders
// ============================================

/// Who authored a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Customer,
    Agent,
}

impl Sender {
    /// Returns the display name for this sender
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::Customer => "Customer",
            Sender::Agent => "Agent",
        }
    }

    /// Returns the identifier used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Customer => "customer",
            Sender::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Sender::Customer),
            "agent" => Ok(Sender::Agent),
            _ => Err(format!("unknown sender: {}", s)),
        }
    }
}

// ============================================
// Sentiment
// ============================================

/// Sentiment classification as received from the analysis service.
///
/// Anything outside the three recognized categories, including a missing
/// field, lands on [`Sentiment::Unknown`] instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    /// Unrecognized or absent classification
    #[default]
    #[serde(other)]
    Unknown,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }

    /// Map to the chart ordinal.
    ///
    /// `Unknown` is treated as neutral here; see the module docs for why the
    /// distinction is kept upstream.
    pub fn level(&self) -> SentimentLevel {
        match self {
            Sentiment::Positive => SentimentLevel::Positive,
            Sentiment::Negative => SentimentLevel::Negative,
            Sentiment::Neutral | Sentiment::Unknown => SentimentLevel::Neutral,
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            _ => Ok(Sentiment::Unknown),
        }
    }
}

/// The three-step ordinal scale the sentiment chart plots.
///
/// Variant order is the axis order: `Negative < Neutral < Positive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLevel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLevel {
    /// Axis order for the chart's value axis, bottom to top.
    pub const AXIS: [SentimentLevel; 3] = [
        SentimentLevel::Negative,
        SentimentLevel::Neutral,
        SentimentLevel::Positive,
    ];

    /// Returns the display name for this level
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentLevel::Negative => "Negative",
            SentimentLevel::Neutral => "Neutral",
            SentimentLevel::Positive => "Positive",
        }
    }

    /// Fixed ordinal used for plotting: -1, 0, +1
    pub fn ordinal(&self) -> i8 {
        match self {
            SentimentLevel::Negative => -1,
            SentimentLevel::Neutral => 0,
            SentimentLevel::Positive => 1,
        }
    }
}

impl std::fmt::Display for SentimentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================
// Chat Events
// ============================================

/// One transcript message as carried in the analysis report.
///
/// The timestamp stays a raw string at this layer; the timeline pivot parses
/// it and is the single place a malformed value is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// RFC 3339 timestamp of the message
    pub timestamp: String,
    /// Who wrote the message
    pub sender: Sender,
    /// Sentiment classification (absent maps to Unknown)
    #[serde(default)]
    pub sentiment: Sentiment,
    /// Message text
    #[serde(default)]
    pub text: String,
}

// ============================================
// Analysis Report Payload
// ============================================

/// Operator- or system-supplied metadata attached to a chat session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Post-chat rating left by the customer, if any
    #[serde(default)]
    pub rating: Option<f64>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The chat transcript and its session-level fields, echoed back by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatData {
    pub session_id: String,
    pub agent_id: String,
    pub channel: String,
    /// Session start, RFC 3339
    pub start_time: String,
    /// Session end, RFC 3339
    pub end_time: String,
    #[serde(default)]
    pub session_metadata: SessionMetadata,
    /// Transcript messages in arrival order
    pub messages: Vec<ChatEvent>,
}

impl ChatData {
    /// Session duration, if both endpoints parse.
    pub fn duration(&self) -> Option<chrono::Duration> {
        let start = parse_rfc3339(&self.start_time)?;
        let end = parse_rfc3339(&self.end_time)?;
        Some(end.signed_duration_since(start))
    }
}

fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Full response payload from the analysis service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub chat_data: ChatData,
    pub overall_score: f64,
    pub response_time_score: f64,
    pub customer_sentiment_score: f64,
    pub agent_sentiment_score: f64,
    /// Free-form formatted feedback text (older service builds omit it)
    #[serde(default)]
    pub feedback: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_level_mapping() {
        assert_eq!(Sentiment::Positive.level(), SentimentLevel::Positive);
        assert_eq!(Sentiment::Negative.level(), SentimentLevel::Negative);
        assert_eq!(Sentiment::Neutral.level(), SentimentLevel::Neutral);
        assert_eq!(Sentiment::Unknown.level(), SentimentLevel::Neutral);
    }

    #[test]
    fn test_sentiment_level_ordering() {
        assert!(SentimentLevel::Negative < SentimentLevel::Neutral);
        assert!(SentimentLevel::Neutral < SentimentLevel::Positive);
        assert_eq!(SentimentLevel::Negative.ordinal(), -1);
        assert_eq!(SentimentLevel::Neutral.ordinal(), 0);
        assert_eq!(SentimentLevel::Positive.ordinal(), 1);
        let labels: Vec<_> = SentimentLevel::AXIS
            .iter()
            .map(|l| l.display_name())
            .collect();
        assert_eq!(labels, vec!["Negative", "Neutral", "Positive"]);
    }

    #[test]
    fn test_unknown_sentiment_deserializes() {
        let event: ChatEvent = serde_json::from_str(
            r#"{"timestamp": "2024-03-01T10:00:00Z", "sender": "customer", "sentiment": "confused", "text": "hm"}"#,
        )
        .unwrap();
        assert_eq!(event.sentiment, Sentiment::Unknown);
    }

    #[test]
    fn test_missing_sentiment_defaults_to_unknown() {
        let event: ChatEvent = serde_json::from_str(
            r#"{"timestamp": "2024-03-01T10:00:00Z", "sender": "agent", "text": "hello"}"#,
        )
        .unwrap();
        assert_eq!(event.sentiment, Sentiment::Unknown);
        assert_eq!(event.sentiment.level(), SentimentLevel::Neutral);
    }

    #[test]
    fn test_sender_round_trip() {
        assert_eq!("customer".parse::<Sender>().unwrap(), Sender::Customer);
        assert_eq!("agent".parse::<Sender>().unwrap(), Sender::Agent);
        assert!("robot".parse::<Sender>().is_err());
        assert_eq!(Sender::Customer.to_string(), "customer");
    }

    #[test]
    fn test_chat_data_duration() {
        let data = ChatData {
            session_id: "s-1".to_string(),
            agent_id: "a-1".to_string(),
            channel: "web".to_string(),
            start_time: "2024-03-01T10:00:00Z".to_string(),
            end_time: "2024-03-01T10:12:30Z".to_string(),
            session_metadata: SessionMetadata::default(),
            messages: vec![],
        };
        assert_eq!(data.duration().unwrap().num_seconds(), 750);

        let bad = ChatData {
            end_time: "not-a-time".to_string(),
            ..data
        };
        assert!(bad.duration().is_none());
    }
}
