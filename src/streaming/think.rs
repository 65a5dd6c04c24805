//! One-shot `<think>` marker injection.

use crate::defaults::think::OPEN_TAGS;
use crate::types::OutputChunk;

/// Per-call marker state.
///
/// The decision is taken on the first non-empty content only: the marker is
/// injected ahead of it unless the content (leading whitespace ignored)
/// already opens with `<think>` or `<thinking>`. Either way the state flips
/// to emitted and never flips back. Create a fresh injector for every call.
#[derive(Debug, Default)]
pub struct ThinkInjector {
    emitted: bool,
}

impl ThinkInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the first non-empty content has been seen.
    pub fn has_emitted(&self) -> bool {
        self.emitted
    }

    /// Turn one content delta into output chunks. Empty content yields
    /// nothing and leaves the state untouched.
    pub fn push(&mut self, content: &str) -> Vec<OutputChunk> {
        if content.is_empty() {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(2);
        if !self.emitted {
            if !opens_with_think_tag(content) {
                out.push(OutputChunk::Marker);
            }
            self.emitted = true;
        }
        out.push(OutputChunk::Content(content.to_string()));
        out
    }
}

fn opens_with_think_tag(content: &str) -> bool {
    let stripped = content.trim_start();
    OPEN_TAGS.iter().any(|tag| stripped.starts_with(tag))
}
