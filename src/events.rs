//! Host status event sinks.
//!
//! The relay reports coarse progress (waiting on upstream, finished, failed)
//! through an [`EventEmitter`]. Hosts that do not render status events pass
//! nothing and get [`NoopEmitter`].

use crate::error::RelayError;
use crate::types::StatusEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Sink for status events.
///
/// A failing emitter never affects the relayed text; the relay logs the
/// failure and carries on.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn emit(&self, event: StatusEvent) -> Result<(), RelayError>;
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

#[async_trait]
impl EventEmitter for NoopEmitter {
    async fn emit(&self, _event: StatusEvent) -> Result<(), RelayError> {
        Ok(())
    }
}

/// Forwards events into an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<StatusEvent>,
}

impl ChannelEmitter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StatusEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventEmitter for ChannelEmitter {
    async fn emit(&self, event: StatusEvent) -> Result<(), RelayError> {
        self.tx
            .send(event)
            .map_err(|_| RelayError::Stream("status event receiver dropped".to_string()))
    }
}

/// Emit and swallow failures.
pub(crate) async fn notify(emitter: &dyn EventEmitter, event: StatusEvent) {
    if let Err(e) = emitter.emit(event).await {
        tracing::warn!(error = %e, "failed to emit status event");
    }
}
