//! Error types for apptsync.

use thiserror::Error;

/// Failure of a single call to the remote appointment service.
///
/// Transport, status and decoding failures are kept apart so logs can tell
/// them apart, but callers only ever render the message: retrying is the
/// sync loop's job, not the caller's.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Could not reach server: {0}")]
    Unreachable(String),

    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Errors that can occur outside of the remote calls.
#[derive(Error, Debug)]
pub enum ApptsyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for apptsync operations.
pub type ApptsyncResult<T> = Result<T, ApptsyncError>;
