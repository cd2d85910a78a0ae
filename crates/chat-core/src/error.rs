//! Error Types

use thiserror::Error;

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Fallback reply rendered in place of the bot message whenever the remote
/// call fails, regardless of why it failed.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting right now.";

/// Chat error types
#[derive(Error, Debug)]
pub enum ChatError {
    /// Remote endpoint answered with a non-2xx status
    #[error("remote endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Transport-level failure (DNS, timeout, connection reset)
    #[error("network error: {0}")]
    Network(String),

    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Bearer token acquisition failed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Upstream provider returned an error or a malformed payload
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream provider unreachable or not responding
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    /// Convert to a user-presentable message.
    ///
    /// The widget-boundary kinds all collapse into the fixed fallback text;
    /// the distinguishing detail belongs on the diagnostic log, never in the
    /// conversation view.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Status { .. } | ChatError::Network(_) => FALLBACK_REPLY.into(),
            ChatError::Config(_) => "The service is not configured correctly.".into(),
            ChatError::Auth(_) => "The service could not authenticate with its AI backend.".into(),
            ChatError::UpstreamUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            ChatError::Upstream(_) | ChatError::Json(_) => {
                "The AI service returned an unexpected response.".into()
            }
            ChatError::Other(_) => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for ChatError {
    fn from(err: anyhow::Error) -> Self {
        ChatError::Other(err.to_string())
    }
}
