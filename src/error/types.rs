//! Core error types.

use crate::defaults;
use thiserror::Error;

/// Every way a relayed call can fail.
///
/// All variants are terminal for the call that produced them and never
/// affect other calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Upstream answered with a non-200 status. `body` is already truncated.
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Connection, TLS, timeout or request-level failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A `data:` payload (or the request body) was not valid JSON of the
    /// expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The response body could not be framed into text lines.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Invalid relay or HTTP configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RelayError {
    /// Build an upstream status error, keeping at most
    /// [`defaults::error::BODY_PREVIEW_CHARS`] characters of the body.
    pub fn upstream_status(status: u16, body: impl AsRef<str>) -> Self {
        Self::UpstreamStatus {
            status,
            body: truncate_chars(body.as_ref(), defaults::error::BODY_PREVIEW_CHARS),
        }
    }

    /// Stable name of the failure kind, used in error chunks and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamStatus { .. } => "UpstreamStatusError",
            Self::Transport(_) => "TransportError",
            Self::Decode(_) => "DecodeError",
            Self::Stream(_) => "StreamError",
            Self::Configuration(_) => "ConfigurationError",
        }
    }

    /// HTTP status of an upstream status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human readable description placed under the `error` key.
    pub fn description(&self) -> String {
        match self {
            Self::UpstreamStatus { .. } => self.to_string(),
            Self::Transport(msg)
            | Self::Decode(msg)
            | Self::Stream(msg)
            | Self::Configuration(msg) => format!("{}: {}", self.kind(), msg),
        }
    }

    /// Render the single JSON chunk `{"error": "<description>"}` that stands
    /// in for model output when a call fails.
    pub fn to_error_chunk(&self) -> String {
        serde_json::json!({ "error": self.description() }).to_string()
    }
}

/// Keep the first `max` characters of `s` (not bytes, so multi-byte text is
/// never split).
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
