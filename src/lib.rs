//! thinkrelay
//!
//! Streaming relay between a chat UI and an OpenAI-compatible inference
//! backend (vLLM, LM Studio, Ollama). Requests are forwarded with the
//! configured model, the SSE reply is streamed back as text, and the first
//! text is guaranteed to open with `<think>` so the UI can show its
//! thinking state.
#![deny(unsafe_code)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod events;
pub mod execution;
pub mod relay;
pub mod streaming;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use config::{RelayConfig, Valves};
pub use error::RelayError;
pub use relay::{StreamRelay, TextStream};

/// Common imports for hosts embedding the relay
pub mod prelude {
    pub use crate::config::{RelayConfig, Valves};
    pub use crate::error::{RelayError, Result};
    pub use crate::events::{ChannelEmitter, EventEmitter, NoopEmitter};
    pub use crate::relay::{StreamRelay, TextStream};
    pub use crate::streaming::ChunkStream;
    pub use crate::types::{HttpConfig, OutputChunk, RequestEnvelope, StatusEvent};
    pub use crate::utils::{CancelHandle, make_cancellable_stream};
}
