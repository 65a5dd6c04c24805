//! HTTP Headers Utility

use crate::config::RelayConfig;
use crate::error::RelayError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

/// HTTP header builder for upstream requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &str) -> Result<Self, RelayError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| RelayError::Configuration(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Add JSON content type
    pub fn with_json_content_type(mut self) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, RelayError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            RelayError::Configuration(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                RelayError::Configuration(format!("Invalid header value for '{name}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Build the headers
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers for one relayed call: JSON content type always, bearer auth only
/// when a non-blank credential is configured.
pub fn build_relay_headers(config: &RelayConfig) -> Result<HeaderMap, RelayError> {
    let mut builder = HttpHeaderBuilder::new().with_json_content_type();
    if let Some(token) = config.bearer_token() {
        builder = builder.with_bearer_auth(token)?;
    }
    Ok(builder.build())
}
