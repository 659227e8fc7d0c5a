//! Agent runtime error types

use thiserror::Error;

/// Failure of the upstream agent run
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RunError {
    pub kind: RunErrorKind,
    pub message: String,
}

impl RunError {
    pub fn new(kind: RunErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RunErrorKind::Network, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(RunErrorKind::Upstream, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(RunErrorKind::Decode, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RunErrorKind::Unavailable, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorKind {
    /// Connection failures, timeouts, dropped feeds - retryable
    Network,
    /// Runtime answered with an error status
    Upstream,
    /// Feed carried something that is not an event
    Decode,
    /// Runtime not configured or could not be set up
    Unavailable,
}

impl RunErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Network)
    }
}
