//! Units of text handed back to the host renderer.

use crate::defaults::think::MARKER;

/// One piece of relayed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChunk {
    /// The injected `<think>\n` literal
    Marker,
    /// Content passed through from upstream as-is
    Content(String),
}

impl OutputChunk {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Marker => MARKER,
            Self::Content(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Marker => MARKER.to_string(),
            Self::Content(text) => text,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }
}

impl std::fmt::Display for OutputChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
