//! Request envelope received from the host.

use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An OpenAI chat-completion shaped request body, kept as an open JSON
/// object so unknown fields pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestEnvelope(Map<String, Value>);

impl RequestEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept any JSON object; anything else is a decode error.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(RelayError::Decode(format!(
                "request body must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Copy of this envelope as sent upstream: `model` replaced by the
    /// configured model and `stream` forced on. `self` is left unchanged.
    pub fn prepare_outgoing(&self, model: &str) -> Self {
        let mut outgoing = self.0.clone();
        outgoing.insert("model".to_string(), Value::String(model.to_string()));
        outgoing.insert("stream".to_string(), Value::Bool(true));
        Self(outgoing)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for RequestEnvelope {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RequestEnvelope {
    type Error = RelayError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
