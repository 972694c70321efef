//! Upload-and-analyze session state machine.
//!
//! [`AnalysisSession`] owns the lifecycle of the current analysis request
//! (idle / loading / ready / failed) and the per-track chart visibility
//! flags. It holds no I/O: the caller performs the upload and hands the
//! outcome back through [`AnalysisSession::resolve`] together with the token
//! it got from [`AnalysisSession::submit_upload`].
//!
//! ## Supersession
//!
//! Submitting while a request is still in flight supersedes it: tokens are
//! monotonically increasing and `resolve` applies an outcome only when its
//! token is the current one. A stale response arriving after a newer request
//! has been issued is discarded, in either arrival order. There is no
//! transport-level cancellation; superseded transfers simply resolve into
//! nothing.

use crate::types::AnalysisReport;

/// Which sentiment track a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Customer,
    Agent,
}

/// Per-track chart visibility, orthogonal to session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub customer: bool,
    pub agent: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            customer: true,
            agent: true,
        }
    }
}

/// Token identifying one in-flight analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Lifecycle of the current analysis request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionStatus {
    /// No upload has been submitted yet
    #[default]
    Idle,
    /// An upload is in flight
    Loading,
    /// The service returned a report
    Ready(AnalysisReport),
    /// The upload or the service call failed; the reason is opaque
    Failed(String),
}

/// Process-local state for the upload-and-display workflow. Never persisted.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    status: SessionStatus,
    visibility: Visibility,
    next_token: u64,
    /// Token of the in-flight request, if any. `resolve` only honors this one.
    current: Option<RequestToken>,
}

impl AnalysisSession {
    /// Create a new session in `Idle` with both tracks visible.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// The stored report, if the session is `Ready`.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.status {
            SessionStatus::Ready(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, SessionStatus::Loading)
    }

    /// Begin a new upload: enters `Loading` synchronously and returns the
    /// token the outcome must carry to be honored.
    ///
    /// Valid from every state. Any previous in-flight request is superseded
    /// and its eventual outcome will be discarded; a previous report or
    /// failure reason is dropped here so the fresh session cannot leak it.
    pub fn submit_upload(&mut self) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        if self.current.is_some() {
            tracing::debug!(token = token.0, "Superseding in-flight analysis request");
        }
        self.current = Some(token);
        self.status = SessionStatus::Loading;
        token
    }

    /// Apply the outcome of an upload, if `token` is still the current one.
    ///
    /// Returns `true` when the outcome was applied. Stale tokens (superseded
    /// requests, duplicate deliveries) are discarded and leave both status
    /// and visibility untouched.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: std::result::Result<AnalysisReport, String>,
    ) -> bool {
        if self.current != Some(token) {
            tracing::debug!(token = token.0, "Discarding stale analysis response");
            return false;
        }
        self.current = None;
        match outcome {
            Ok(report) => {
                tracing::info!(
                    session_id = %report.chat_data.session_id,
                    messages = report.chat_data.messages.len(),
                    "Analysis ready"
                );
                self.status = SessionStatus::Ready(report);
            }
            Err(reason) => {
                tracing::warn!(reason = %reason, "Analysis failed");
                self.status = SessionStatus::Failed(reason);
            }
        }
        true
    }

    /// Flip one track's visibility. Valid in every state; never touches
    /// status or the stored report.
    pub fn toggle(&mut self, track: Track) {
        match track {
            Track::Customer => self.visibility.customer = !self.visibility.customer,
            Track::Agent => self.visibility.agent = !self.visibility.agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatData, SessionMetadata};

    fn report(session_id: &str) -> AnalysisReport {
        AnalysisReport {
            chat_data: ChatData {
                session_id: session_id.to_string(),
                agent_id: "agent-7".to_string(),
                channel: "web".to_string(),
                start_time: "2024-03-01T10:00:00Z".to_string(),
                end_time: "2024-03-01T10:10:00Z".to_string(),
                session_metadata: SessionMetadata::default(),
                messages: vec![],
            },
            overall_score: 7.5,
            response_time_score: 0.8,
            customer_sentiment_score: 0.4,
            agent_sentiment_score: 0.9,
            feedback: String::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let session = AnalysisSession::new();
        assert_eq!(*session.status(), SessionStatus::Idle);
        assert!(session.visibility().customer);
        assert!(session.visibility().agent);
    }

    #[test]
    fn test_submit_enters_loading_synchronously() {
        let mut session = AnalysisSession::new();
        session.submit_upload();
        assert!(session.is_loading());
    }

    #[test]
    fn test_success_enters_ready() {
        let mut session = AnalysisSession::new();
        let token = session.submit_upload();
        assert!(session.resolve(token, Ok(report("s-1"))));
        assert_eq!(session.report().unwrap().chat_data.session_id, "s-1");
    }

    #[test]
    fn test_failure_enters_failed_with_reason() {
        let mut session = AnalysisSession::new();
        let token = session.submit_upload();
        assert!(session.resolve(token, Err("connection refused".to_string())));
        assert_eq!(
            *session.status(),
            SessionStatus::Failed("connection refused".to_string())
        );
    }

    #[test]
    fn test_resubmit_replaces_ready_and_failed() {
        let mut session = AnalysisSession::new();
        let token = session.submit_upload();
        session.resolve(token, Ok(report("s-1")));

        session.submit_upload();
        assert!(session.is_loading());
        assert!(session.report().is_none());

        let token = session.submit_upload();
        session.resolve(token, Err("timeout".to_string()));
        session.submit_upload();
        assert!(session.is_loading());
    }

    #[test]
    fn test_supersession_stale_response_arrives_last() {
        // A then B submitted; B resolves first, A's late response is dropped.
        let mut session = AnalysisSession::new();
        let token_a = session.submit_upload();
        let token_b = session.submit_upload();

        assert!(session.resolve(token_b, Ok(report("s-b"))));
        assert!(!session.resolve(token_a, Ok(report("s-a"))));
        assert_eq!(session.report().unwrap().chat_data.session_id, "s-b");
    }

    #[test]
    fn test_supersession_stale_response_arrives_first() {
        // A's response lands after B was submitted but before B resolves:
        // the session must stay Loading until B's outcome arrives.
        let mut session = AnalysisSession::new();
        let token_a = session.submit_upload();
        let token_b = session.submit_upload();

        assert!(!session.resolve(token_a, Err("stale failure".to_string())));
        assert!(session.is_loading());

        assert!(session.resolve(token_b, Ok(report("s-b"))));
        assert_eq!(session.report().unwrap().chat_data.session_id, "s-b");
    }

    #[test]
    fn test_duplicate_resolution_is_discarded() {
        let mut session = AnalysisSession::new();
        let token = session.submit_upload();
        assert!(session.resolve(token, Ok(report("s-1"))));
        assert!(!session.resolve(token, Err("late duplicate".to_string())));
        assert_eq!(session.report().unwrap().chat_data.session_id, "s-1");
    }

    #[test]
    fn test_toggle_is_orthogonal_to_status() {
        let mut session = AnalysisSession::new();
        let token = session.submit_upload();
        session.resolve(token, Ok(report("s-1")));
        let status_before = session.status().clone();

        session.toggle(Track::Customer);
        assert!(!session.visibility().customer);
        assert!(session.visibility().agent);
        assert_eq!(*session.status(), status_before);

        // Double toggle restores the original visibility.
        session.toggle(Track::Customer);
        assert_eq!(session.visibility(), Visibility::default());
    }

    #[test]
    fn test_toggle_valid_while_loading() {
        let mut session = AnalysisSession::new();
        session.submit_upload();
        session.toggle(Track::Agent);
        assert!(session.is_loading());
        assert!(!session.visibility().agent);
    }
}
