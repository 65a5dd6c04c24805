//! Lines to output chunks.

use super::lines::{LineStream, SseLine};
use super::think::ThinkInjector;
use crate::error::RelayError;
use crate::types::{OutputChunk, UpstreamFrame};
use futures_util::{Stream, StreamExt};
use std::pin::Pin;

/// Relayed output of one call; the first error is also the last item.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<OutputChunk, RelayError>> + Send>>;

/// Drive the line stream through frame decoding and marker injection.
///
/// - `data: [DONE]` ends the stream with nothing further
/// - non-`data: ` lines are skipped
/// - a payload that is not a valid frame ends the stream with a decode error
/// - a line-level error ends the stream with that error
///
/// The injector lives inside the returned stream, so every call starts from
/// a clean state.
pub fn relay_frames(mut lines: LineStream) -> ChunkStream {
    let out = async_stream::stream! {
        let mut injector = ThinkInjector::new();

        while let Some(item) = lines.next().await {
            let line = match item {
                Ok(line) => line,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            let frame: UpstreamFrame = match SseLine::classify(&line) {
                SseLine::Done => {
                    tracing::debug!("upstream sent done sentinel");
                    return;
                }
                SseLine::Ignored => continue,
                SseLine::Data(payload) => match serde_json::from_str(payload) {
                    Ok(frame) => frame,
                    Err(e) => {
                        yield Err(RelayError::Decode(format!("Malformed SSE frame: {e}")));
                        return;
                    }
                },
            };

            for chunk in injector.push(frame.content()) {
                yield Ok(chunk);
            }
        }

        tracing::debug!("upstream body ended without done sentinel");
    };

    Box::pin(out)
}
