//! Cancellation utilities
//!
//! Dropping a relay stream already closes the upstream connection. A
//! [`CancelHandle`] is for the case where the consumer lives elsewhere (a
//! host task, a UI "stop" button) and only needs to signal.

use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Request cancellation. The wrapped stream ends at its next poll and
    /// drops the inner stream, which closes the upstream connection.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Make a stream cancellable and return its cancel handle.
pub fn make_cancellable_stream<S, T>(
    stream: S,
) -> (Pin<Box<dyn Stream<Item = T> + Send>>, CancelHandle)
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let flag = Arc::new(AtomicBool::new(false));
    let handle = CancelHandle::new(flag.clone());
    let mut inner = stream;
    let s = async_stream::stream! {
        loop {
            if flag.load(Ordering::SeqCst) {
                tracing::debug!("relay stream cancelled");
                break;
            }
            match inner.next().await {
                Some(item) if !flag.load(Ordering::SeqCst) => {
                    yield item;
                }
                _ => break,
            }
        }
    };
    (Box::pin(s), handle)
}

/// Create a standalone cancel handle that can be shared across tasks.
pub fn new_cancel_handle() -> CancelHandle {
    CancelHandle::new(Arc::new(AtomicBool::new(false)))
}
