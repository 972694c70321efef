//! # chatlens-core
//!
//! Core library for chatlens - a chat-log evaluation dashboard.
//!
//! This library provides:
//! - Domain types for chat transcripts and analysis reports
//! - The sentiment timeline pivot (per-event stream to two-track series)
//! - The upload session state machine with stale-response protection
//! - The HTTP client for the external analysis service
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data flow
//!
//! An upload goes to the analysis service via [`AnalysisClient`]; the outcome
//! resolves an [`AnalysisSession`] into `Ready` or `Failed`; on each render
//! [`timeline::build`] pivots the stored report's messages into the rows the
//! chart plots, filtered by the session's track visibility.
//!
//! ## Example
//!
//! ```rust
//! use chatlens_core::{AnalysisSession, SessionStatus};
//!
//! let mut session = AnalysisSession::new();
//! let token = session.submit_upload();
//! assert_eq!(*session.status(), SessionStatus::Loading);
//! session.resolve(token, Err("service unreachable".to_string()));
//! assert!(matches!(session.status(), SessionStatus::Failed(_)));
//! ```

// Re-export commonly used items at the crate root
pub use client::AnalysisClient;
pub use config::Config;
pub use error::{Error, Result};
pub use session::{AnalysisSession, RequestToken, SessionStatus, Track, Visibility};
pub use timeline::TimelinePoint;
pub use types::*;

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod session;
pub mod timeline;
pub mod types;
