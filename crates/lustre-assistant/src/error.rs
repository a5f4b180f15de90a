//! Assistant error types.

use thiserror::Error;

/// Errors reported by a completion service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("completion service returned no text")]
    EmptyResponse,
    #[error("json error: {0}")]
    Serde(String),
}

impl AssistantError {
    /// Returns true if the error is transient and the request may be sent
    /// again.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout | Self::RateLimited => true,
            Self::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}
