//! Stream Relay
//!
//! Forwards a chat-completion request to an OpenAI-compatible backend and
//! streams the reply back, making sure the first text the host sees opens
//! with a `<think>` marker.
//!
//! ```rust,ignore
//! use futures_util::StreamExt;
//! use thinkrelay::prelude::*;
//!
//! let relay = StreamRelay::new(Valves::from_env().into_config()?)?;
//! let mut out = relay.pipe(serde_json::json!({
//!     "messages": [{"role": "user", "content": "Why is the sky blue?"}]
//! }), None);
//! while let Some(text) = out.next().await {
//!     print!("{text}");
//! }
//! ```

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::events::{EventEmitter, NoopEmitter, notify};
use crate::execution::http::{build_http_client_from_config, build_relay_headers};
use crate::streaming::{ChunkStream, relay_frames, sse_lines};
use crate::types::{OutputChunk, RequestEnvelope, StatusEvent};
use crate::utils::InSpan;
use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tracing::Span;
use uuid::Uuid;

/// Text handed to the host. Errors appear as a single `{"error": ...}` item.
pub type TextStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Relay bound to one upstream endpoint.
///
/// Holds no per-call state: every call to [`stream`](Self::stream) or
/// [`pipe`](Self::pipe) gets its own marker state, so one relay can serve
/// any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct StreamRelay {
    config: RelayConfig,
    http_client: reqwest::Client,
}

static_assertions::assert_impl_all!(StreamRelay: Send, Sync, Clone);

impl StreamRelay {
    /// Validate `config` and build an HTTP client from its `http_config`.
    pub fn new(config: RelayConfig) -> Result<Self> {
        config.validate()?;
        let http_client = build_http_client_from_config(&config.http_config)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Use a caller-supplied HTTP client; `config.http_config` is ignored.
    pub fn with_http_client(config: RelayConfig, http_client: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Build the upstream request: JSON headers, optional bearer auth, and
    /// the envelope with `model` and `stream` overridden.
    pub fn prepare_request(&self, envelope: &RequestEnvelope) -> Result<reqwest::RequestBuilder> {
        let headers = build_relay_headers(&self.config)?;
        let body = envelope.prepare_outgoing(&self.config.model);
        Ok(self
            .http_client
            .post(self.config.chat_completions_url())
            .headers(headers)
            .json(&body))
    }

    /// Stream the upstream reply as output chunks.
    ///
    /// Exactly one connection is opened. A non-200 status yields a single
    /// [`RelayError::UpstreamStatus`] with at most 200 characters of the
    /// body. Any error is the last item. Dropping the stream at any point
    /// releases the connection.
    ///
    /// The stream is polled inside a `relay` span carrying a fresh
    /// `request_id`, so every event of the call can be tied to it.
    pub fn stream(&self, envelope: &RequestEnvelope) -> ChunkStream {
        let span = self.call_span();
        let chunks = self.stream_upstream(envelope);
        Box::pin(InSpan::new(chunks, span))
    }

    fn call_span(&self) -> Span {
        let request_id = Uuid::new_v4();
        tracing::debug_span!("relay", %request_id, model = %self.config.model)
    }

    fn stream_upstream(&self, envelope: &RequestEnvelope) -> ChunkStream {
        let request = self.prepare_request(envelope);
        let url = self.config.chat_completions_url();

        let out = async_stream::stream! {
            let request = match request {
                Ok(request) => request,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            tracing::debug!(%url, "opening upstream stream");
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, "upstream request failed");
                    yield Err(RelayError::from(e));
                    return;
                }
            };

            let status = response.status();
            if status != reqwest::StatusCode::OK {
                match response.text().await {
                    Ok(body) => {
                        tracing::warn!(status = status.as_u16(), "upstream returned error status");
                        yield Err(RelayError::upstream_status(status.as_u16(), body));
                    }
                    Err(e) => {
                        tracing::warn!(status = status.as_u16(), error = %e, "failed to read error body");
                        yield Err(RelayError::from(e));
                    }
                }
                return;
            }

            let bytes = response
                .bytes_stream()
                .map(|chunk| chunk.map_err(std::io::Error::other));
            let mut chunks = relay_frames(sse_lines(bytes));
            let mut emitted = 0usize;
            while let Some(item) = chunks.next().await {
                match item {
                    Ok(chunk) => {
                        emitted += 1;
                        yield Ok(chunk);
                    }
                    Err(e) => {
                        tracing::warn!(kind = e.kind(), error = %e, "upstream stream failed");
                        yield Err(e);
                        return;
                    }
                }
            }
            tracing::debug!(chunks = emitted, "upstream stream finished");
        };

        Box::pin(out)
    }

    /// Host-facing entry point.
    ///
    /// Accepts the raw request body and yields plain text. Failures never
    /// escape: the terminal error becomes one `{"error": "..."}` chunk.
    /// Status events go to `emitter` when one is given.
    pub fn pipe(
        &self,
        body: serde_json::Value,
        emitter: Option<Arc<dyn EventEmitter>>,
    ) -> TextStream {
        let emitter: Arc<dyn EventEmitter> = emitter.unwrap_or_else(|| Arc::new(NoopEmitter));
        let mut chunks: ChunkStream = match RequestEnvelope::from_value(body) {
            Ok(envelope) => self.stream_upstream(&envelope),
            Err(e) => Box::pin(futures_util::stream::once(async move {
                Err::<OutputChunk, _>(e)
            })),
        };
        let model = self.config.model.clone();

        let out = async_stream::stream! {
            notify(emitter.as_ref(), StatusEvent::in_progress(format!("Waiting for {model}"))).await;

            let mut failure: Option<RelayError> = None;
            while let Some(item) = chunks.next().await {
                match item {
                    Ok(chunk) => {
                        yield chunk.into_text();
                    }
                    Err(e) => {
                        yield e.to_error_chunk();
                        failure = Some(e);
                        break;
                    }
                }
            }

            let done = match failure {
                Some(e) => StatusEvent::finished(format!("Failed: {}", e.kind())),
                None => StatusEvent::finished("Done"),
            };
            notify(emitter.as_ref(), done).await;
        };

        Box::pin(InSpan::new(Box::pin(out), self.call_span()))
    }
}
