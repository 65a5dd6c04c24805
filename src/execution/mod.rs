//! Execution layer: HTTP client construction and request headers.

pub mod http;
