//! Status events pushed to the host alongside the text stream.

use serde::{Deserialize, Serialize};

/// Progress notice rendered by the host next to the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub description: String,
    pub done: bool,
}

impl StatusEvent {
    pub fn in_progress(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }

    pub fn finished(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: true,
        }
    }

    /// Wire shape expected by the host: `{"type": "status", "data": {...}}`
    pub fn to_host_event(&self) -> serde_json::Value {
        serde_json::json!({ "type": "status", "data": self })
    }
}
