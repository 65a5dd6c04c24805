//! Streaming pipeline
//!
//! Bytes from the upstream response are framed into text lines, each line is
//! classified as an SSE `data:` payload, the done sentinel or noise, payloads
//! are decoded into frames, and frame content goes through the think marker
//! injector before reaching the host.

pub mod frames;
pub mod lines;
pub mod think;

pub use frames::{ChunkStream, relay_frames};
pub use lines::{LineStream, SseLine, sse_lines};
pub use think::ThinkInjector;
