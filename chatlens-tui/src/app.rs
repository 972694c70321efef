//! Application state for the TUI.

use std::path::PathBuf;
use std::sync::mpsc;

use chatlens_core::{AnalysisClient, AnalysisReport, AnalysisSession, RequestToken, Track};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::runtime::Handle;

/// Outcome of one upload request, tagged with the token it belongs to.
type UploadOutcome = (RequestToken, Result<AnalysisReport, String>);

/// Main application state.
pub struct App {
    /// Analysis service client (cheap to clone into upload tasks)
    client: AnalysisClient,
    /// Runtime handle for spawning upload tasks
    runtime: Handle,
    /// Sender cloned into each upload task
    tx: mpsc::Sender<UploadOutcome>,
    /// Receiver drained by the event loop each tick
    rx: mpsc::Receiver<UploadOutcome>,
    /// Upload lifecycle and track visibility
    pub session: AnalysisSession,
    /// File submitted most recently (re-submitted with 'u')
    pub current_file: Option<PathBuf>,
    /// Scroll offset for the transcript panel
    pub transcript_offset: usize,
    /// Animation frame counter (increments each render)
    pub animation_frame: u64,
    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create a new App in the idle state.
    pub fn new(client: AnalysisClient, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            runtime,
            tx,
            rx,
            session: AnalysisSession::new(),
            current_file: None,
            transcript_offset: 0,
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Submit a chat log for analysis, superseding any in-flight request.
    ///
    /// The session enters Loading before the task is spawned, so no render
    /// can observe an idle state with a pending request.
    pub fn submit_upload(&mut self, path: PathBuf) {
        let token = self.session.submit_upload();
        self.transcript_offset = 0;

        tracing::info!(file = %path.display(), "Submitting chat log for analysis");
        self.current_file = Some(path.clone());

        let client = self.client.clone();
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = client.analyze(&path).await.map_err(|e| e.to_string());
            // The receiver is gone only during shutdown; nothing to do then.
            let _ = tx.send((token, result));
        });
    }

    /// Drain completed uploads into the session. Stale tokens are discarded
    /// by the session itself.
    pub fn poll_responses(&mut self) {
        while let Ok((token, result)) = self.rx.try_recv() {
            self.session.resolve(token, result);
        }
    }

    /// Advance the animation counter (called once per render).
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Number of transcript messages in the current report, if any.
    fn transcript_len(&self) -> usize {
        self.session
            .report()
            .map(|r| r.chat_data.messages.len())
            .unwrap_or(0)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => self.session.toggle(Track::Customer),
            KeyCode::Char('a') => self.session.toggle(Track::Agent),
            KeyCode::Char('u') => {
                if let Some(file) = self.current_file.clone() {
                    self.submit_upload(file);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.transcript_offset + 1 < self.transcript_len() {
                    self.transcript_offset += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.transcript_offset = self.transcript_offset.saturating_sub(1);
            }
            KeyCode::Home => self.transcript_offset = 0,
            _ => {}
        }
    }
}
