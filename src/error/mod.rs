//! Error Handling Module
//!
//! - Core error type (`RelayError`) with one variant per failure mode
//! - Rendering of the terminal `{"error": ...}` chunk seen by the host
//! - Conversions from `reqwest` and `serde_json` errors
//!
//! # Example
//!
//! ```rust,ignore
//! use thinkrelay::error::RelayError;
//!
//! let error = RelayError::upstream_status(500, "server error");
//! assert_eq!(error.status_code(), Some(500));
//! assert_eq!(
//!     error.to_error_chunk(),
//!     r#"{"error":"Upstream returned 500: server error"}"#
//! );
//! ```

mod conversions;
pub mod types;

pub use types::*;
