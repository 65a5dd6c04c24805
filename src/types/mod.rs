//! Core data types exchanged between the host, the relay and the upstream.

pub mod chunk;
pub mod envelope;
pub mod frame;
pub mod http;
pub mod status;

pub use chunk::OutputChunk;
pub use envelope::RequestEnvelope;
pub use frame::{FrameChoice, FrameDelta, UpstreamFrame};
pub use http::{HttpConfig, HttpConfigBuilder};
pub use status::StatusEvent;
