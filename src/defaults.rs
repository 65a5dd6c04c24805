//! Default Configuration Values
//!
//! Centralizes the constants used by the relay: HTTP timeouts, the default
//! upstream settings, SSE framing literals and the think marker.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Overall timeout for one relayed call, covering connect, headers and
    /// the whole streamed body.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("thinkrelay/", env!("CARGO_PKG_VERSION"));
}

/// Default upstream settings, used when the host supplies none.
pub mod relay {
    /// Base URL of a local vLLM / OpenAI-compatible server
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/v1";

    /// Blank key: no Authorization header is sent
    pub const DEFAULT_API_KEY: &str = "";

    /// Model name substituted into every outgoing request
    pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-R1-Distill-Llama-8B";

    /// Path appended to the base URL
    pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
}

/// Server-Sent-Events line framing
pub mod sse {
    /// Prefix of every payload-carrying line
    pub const DATA_PREFIX: &str = "data: ";

    /// Line that ends the stream
    pub const DONE_LINE: &str = "data: [DONE]";
}

/// Think marker handling
pub mod think {
    /// Chunk injected ahead of the first content when the model omits it
    pub const MARKER: &str = "<think>\n";

    /// Opening tags that count as an already-present marker
    pub const OPEN_TAGS: [&str; 2] = ["<think>", "<thinking>"];
}

/// Error reporting limits
pub mod error {
    /// Maximum number of characters of an upstream error body kept in the
    /// error chunk.
    pub const BODY_PREVIEW_CHARS: usize = 200;
}

/// Environment variables read by [`crate::config::Valves::from_env`]
pub mod env {
    pub const API_BASE_URL: &str = "THINKRELAY_API_BASE_URL";
    pub const API_KEY: &str = "THINKRELAY_API_KEY";
    pub const MODEL_NAME: &str = "THINKRELAY_MODEL_NAME";
}
