//! Error types for chatlens-core

use thiserror::Error;

/// Main error type for the chatlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A chat event carried a timestamp that could not be parsed
    #[error("malformed timestamp in chat event: {value:?}")]
    MalformedTimestamp {
        /// The raw timestamp string as received
        value: String,
    },

    /// Analysis service error (unreachable, non-success status, bad payload)
    #[error("analysis service error: {0}")]
    Service(String),
}

/// Result type alias for chatlens-core
pub type Result<T> = std::result::Result<T, Error>;
