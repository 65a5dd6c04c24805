//! Text-line framing of an SSE body.
//!
//! Only the exact `data: ` prefix carries payloads and only the exact line
//! `data: [DONE]` ends the stream; nothing is trimmed before matching.

use crate::defaults::sse::{DATA_PREFIX, DONE_LINE};
use crate::error::RelayError;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use tokio_util::codec::{FramedRead, LinesCodec};
use tokio_util::io::StreamReader;

/// What a single line of the upstream body means to the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseLine<'a> {
    /// The `data: [DONE]` sentinel
    Done,
    /// Payload of a `data: ` line, prefix removed
    Data(&'a str),
    /// Blank keep-alives, comments, `event:`/`id:` fields and anything else
    Ignored,
}

impl<'a> SseLine<'a> {
    pub fn classify(line: &'a str) -> Self {
        if line == DONE_LINE {
            return Self::Done;
        }
        match line.strip_prefix(DATA_PREFIX) {
            Some(payload) => Self::Data(payload),
            None => Self::Ignored,
        }
    }
}

/// Stream of decoded text lines, line terminators removed
pub type LineStream = Pin<Box<dyn Stream<Item = Result<String, RelayError>> + Send>>;

/// Split a byte stream into lines.
///
/// `\n` and `\r\n` terminators are accepted, chunk boundaries may fall
/// anywhere (including inside a UTF-8 sequence), and a trailing line without
/// terminator is still delivered. Invalid UTF-8 is a stream error.
pub fn sse_lines<S>(byte_stream: S) -> LineStream
where
    S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
{
    let reader = StreamReader::new(byte_stream);
    let lines = FramedRead::new(reader, LinesCodec::new())
        .map(|line| line.map_err(RelayError::from));
    Box::pin(lines)
}
