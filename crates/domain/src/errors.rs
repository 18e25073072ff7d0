//! Error type shared by every layer of the client

use thiserror::Error;

/// Prefix carried by every timeout message. Callers match on it.
pub const READ_TIMED_OUT: &str = "Read timed out";

/// The one error kind surfaced by the Salt API client.
///
/// Transport failures, non-2xx responses and malformed bodies all come back
/// as a `SaltError`. The variants exist for convenience; the message text
/// carries the detail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaltError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Read timed out: {0}")]
    Timeout(String),

    #[error("Response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Empty result list returned by {endpoint}")]
    EmptyResponse { endpoint: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl SaltError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Status { .. } => "status",
            Self::Parse(_) => "parse",
            Self::EmptyResponse { .. } => "empty_response",
            Self::Config(_) => "config",
            Self::Cancelled => "cancelled",
        }
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SaltError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type alias for Salt API operations
pub type Result<T> = std::result::Result<T, SaltError>;
