//! Relay Configuration
//!
//! `RelayConfig` is what the relay runs with. `Valves` is the settings record
//! the host UI edits and stores; it deserializes from the host's JSON using
//! the host's field names and converts into a `RelayConfig`.

use crate::defaults;
use crate::error::RelayError;
use crate::types::HttpConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use validator::Validate;

/// Configuration for one upstream OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL, used as-is (`/chat/completions` is appended)
    pub base_url: String,
    /// Optional credential; blank means no Authorization header
    pub api_key: SecretString,
    /// Model substituted into every outgoing request
    pub model: String,
    /// HTTP configuration (timeout, proxy, etc.)
    pub http_config: HttpConfig,
}

impl RelayConfig {
    /// Create a new configuration without a credential
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::from(String::new()),
            model: model.into(),
            http_config: HttpConfig::default(),
        }
    }

    /// Set the credential
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::from(api_key.into());
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set HTTP configuration
    pub fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Trimmed credential, or `None` when it is blank.
    pub fn bearer_token(&self) -> Option<&str> {
        let key = self.api_key.expose_secret().trim();
        (!key.is_empty()).then_some(key)
    }

    /// Full URL of the streaming endpoint
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url,
            defaults::relay::CHAT_COMPLETIONS_PATH
        )
    }

    /// Validate the configuration. The URL scheme is deliberately not
    /// checked; the base URL is passed to the HTTP client as-is.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.base_url.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Base URL cannot be empty".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Model name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Valves::default().into()
    }
}

/// Host-editable settings.
///
/// ```rust,ignore
/// let valves: Valves = serde_json::from_str(r#"{"MODEL_NAME": "qwen3-8b"}"#)?;
/// let relay = StreamRelay::new(valves.into_config()?)?;
/// ```
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Valves {
    /// Base URL of the vLLM / OpenAI-compatible server
    #[serde(rename = "API_BASE_URL", default = "default_base_url")]
    #[validate(length(min = 1, message = "API_BASE_URL cannot be empty"))]
    pub api_base_url: String,

    /// Optional API key for the upstream server
    #[serde(
        rename = "API_KEY",
        default = "default_api_key",
        deserialize_with = "deserialize_secret"
    )]
    pub api_key: SecretString,

    /// Exact model name the upstream server reports
    #[serde(rename = "MODEL_NAME", default = "default_model")]
    #[validate(length(min = 1, message = "MODEL_NAME cannot be empty"))]
    pub model_name: String,
}

fn default_base_url() -> String {
    defaults::relay::DEFAULT_BASE_URL.to_string()
}

fn default_api_key() -> SecretString {
    SecretString::from(defaults::relay::DEFAULT_API_KEY.to_string())
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn default_model() -> String {
    defaults::relay::DEFAULT_MODEL.to_string()
}

impl Default for Valves {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            api_key: default_api_key(),
            model_name: default_model(),
        }
    }
}

impl Valves {
    /// Read `THINKRELAY_API_BASE_URL`, `THINKRELAY_API_KEY` and
    /// `THINKRELAY_MODEL_NAME`, falling back to the defaults for unset ones.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut valves = Self::default();
        if let Some(url) = lookup(defaults::env::API_BASE_URL) {
            valves.api_base_url = url;
        }
        if let Some(key) = lookup(defaults::env::API_KEY) {
            valves.api_key = SecretString::from(key);
        }
        if let Some(model) = lookup(defaults::env::MODEL_NAME) {
            valves.model_name = model;
        }
        valves
    }

    /// Validate and convert into a relay configuration
    pub fn into_config(self) -> Result<RelayConfig, RelayError> {
        Validate::validate(&self)
            .map_err(|e| RelayError::Configuration(format!("Invalid valves: {e}")))?;
        Ok(self.into())
    }
}

impl From<Valves> for RelayConfig {
    fn from(valves: Valves) -> Self {
        Self {
            base_url: valves.api_base_url,
            api_key: valves.api_key,
            model: valves.model_name,
            http_config: HttpConfig::default(),
        }
    }
}
