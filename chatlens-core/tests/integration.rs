//! Integration tests for the analysis report payload and timeline pivot
//!
//! These tests use the fixture report in `tests/fixtures/` to verify the
//! end-to-end decode-and-pivot flow a Ready session goes through on render.

use chatlens_core::timeline;
use chatlens_core::types::{AnalysisReport, Sentiment, SentimentLevel};
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_report() -> AnalysisReport {
    let raw = std::fs::read_to_string(fixture_path("sample-report.json"))
        .expect("fixture should be readable");
    serde_json::from_str(&raw).expect("fixture should decode")
}

#[test]
fn test_decode_full_report() {
    let report = load_report();

    assert_eq!(report.chat_data.session_id, "cs-2024-0301-183");
    assert_eq!(report.chat_data.agent_id, "agent-42");
    assert_eq!(report.chat_data.channel, "web");
    assert_eq!(report.chat_data.session_metadata.rating, Some(4.0));
    assert_eq!(
        report.chat_data.session_metadata.tags,
        vec!["billing", "resolved"]
    );
    assert_eq!(report.chat_data.messages.len(), 6);
    assert_eq!(report.overall_score, 7.8);
    assert!(report.feedback.contains("billing"));

    // The closing agent message has no sentiment field.
    assert_eq!(
        report.chat_data.messages.last().unwrap().sentiment,
        Sentiment::Unknown
    );

    // Session duration is derived from the start/end pair.
    assert_eq!(report.chat_data.duration().unwrap().num_seconds(), 450);
}

#[test]
fn test_pivot_fixture_messages() {
    let report = load_report();
    let rows = timeline::build(&report.chat_data.messages).expect("pivot should succeed");

    // 6 messages, two share 10:03:10 -> 5 distinct instants.
    assert_eq!(rows.len(), 5);

    // Sorted ascending by instant.
    for pair in rows.windows(2) {
        assert!(pair[0].timestamp < pair[1].timestamp);
    }

    // Opening exchange: customer negative, then agent neutral.
    assert_eq!(rows[0].customer, Some(SentimentLevel::Negative));
    assert_eq!(rows[0].agent, None);
    assert_eq!(rows[1].agent, Some(SentimentLevel::Neutral));
    assert_eq!(rows[1].customer, None);

    // The shared instant populates both tracks in one row.
    assert_eq!(rows[2].customer, Some(SentimentLevel::Neutral));
    assert_eq!(rows[2].agent, Some(SentimentLevel::Positive));

    // The sentiment-less closing message plots as neutral, not absent.
    assert_eq!(rows[4].agent, Some(SentimentLevel::Neutral));
}

#[test]
fn test_report_survives_session_round_trip() {
    use chatlens_core::{AnalysisSession, SessionStatus};

    let report = load_report();
    let mut session = AnalysisSession::new();
    let token = session.submit_upload();
    assert_eq!(*session.status(), SessionStatus::Loading);

    assert!(session.resolve(token, Ok(report.clone())));
    assert_eq!(session.report(), Some(&report));
}
