//! One decoded `data:` payload of the upstream stream.
//!
//! Every level is optional so that a frame missing `choices`, `delta` or
//! `content` simply carries no content.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpstreamFrame {
    #[serde(default)]
    pub choices: Option<Vec<FrameChoice>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrameChoice {
    #[serde(default)]
    pub delta: Option<FrameDelta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FrameDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl UpstreamFrame {
    /// `choices[0].delta.content`, or `""` when any level is absent or null.
    pub fn content(&self) -> &str {
        self.choices
            .as_deref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.delta.as_ref())
            .and_then(|delta| delta.content.as_deref())
            .unwrap_or("")
    }
}
