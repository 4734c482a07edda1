//! Transport error types for a single connection.

use thiserror::Error;

/// Failure to deliver a payload to one connection.
///
/// Always local to that connection: callers log it and move on.
#[derive(Debug, Clone, Error)]
pub enum SendError {
    #[error("Connection already closed")]
    Closed,

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure while waiting for inbound data.
#[derive(Debug, Clone, Error)]
pub enum ReceiveError {
    /// Stream error that does not by itself end the session.
    #[error("Transient receive error: {0}")]
    Transient(String),

    /// Stream can no longer be read.
    #[error("Fatal receive error: {0}")]
    Fatal(String),
}

impl ReceiveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReceiveError::Fatal(_))
    }
}
