//! HTTP helpers shared by the relay.

pub mod client;
pub mod headers;

pub use client::build_http_client_from_config;
pub use headers::{HttpHeaderBuilder, build_relay_headers};
