//! Span propagation for relay streams
//!
//! `async_stream` generators run on whatever task polls them, so events
//! logged inside lose the caller's span. [`InSpan`] enters a span for the
//! duration of every poll.

use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::Span;

/// Stream wrapper that polls `inner` inside `span`.
#[derive(Debug)]
pub struct InSpan<S> {
    inner: S,
    span: Span,
}

impl<S> InSpan<S> {
    pub fn new(inner: S, span: Span) -> Self {
        Self { inner, span }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl<S> Stream for InSpan<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;
        let _entered = this.span.enter();
        Pin::new(&mut this.inner).poll_next(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
