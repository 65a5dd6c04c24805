//! Utility modules

pub mod cancel;
pub mod span;

pub use cancel::{CancelHandle, make_cancellable_stream, new_cancel_handle};
pub use span::InSpan;
