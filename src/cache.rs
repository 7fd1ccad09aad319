//! Front door of the engine: stream state in, section tree out, with a
//! memo guard so unchanged frames cost a comparison instead of a parse.

use crate::interleave::interleave;
use crate::section::{build_section_tree, SectionNode};
use crate::tool::ToolCallList;

/// Caller-supplied input for one assistant turn.
///
/// `text` grows monotonically while the turn streams and may be
/// replaced wholesale when a new turn begins. `is_complete` changes
/// nothing about parsing; the renderer uses it to gate collapse
/// interactivity.
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    pub text: String,
    pub tool_calls: ToolCallList,
    pub is_complete: bool,
}

impl StreamState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_calls: ToolCallList::new(),
            is_complete: false,
        }
    }
}

/// Memoizes the parse pipeline on `(text, tool-call revision)`.
///
/// The revision counter is what makes in-place tool mutations visible:
/// a call moving from pending to complete changes neither the text nor
/// the call count, but it does bump the revision.
#[derive(Debug, Default)]
pub struct ParseCache {
    text: String,
    revision: u64,
    nodes: Vec<SectionNode>,
    primed: bool,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Section tree for the given state, reparsing only when the text
    /// or the tool-call revision moved.
    pub fn update(&mut self, state: &StreamState) -> &[SectionNode] {
        let revision = state.tool_calls.revision();
        if self.primed && self.revision == revision && self.text == state.text {
            tracing::trace!("parse cache hit at revision {}", revision);
            return &self.nodes;
        }

        let blocks = interleave(&state.text, state.tool_calls.calls());
        self.nodes = build_section_tree(blocks);
        self.text.clone_from(&state.text);
        self.revision = revision;
        self.primed = true;

        tracing::debug!(
            "reparsed {} bytes and {} tool calls into {} top-level nodes",
            state.text.len(),
            state.tool_calls.len(),
            self.nodes.len()
        );

        &self.nodes
    }

    /// Most recent tree, without checking freshness.
    pub fn nodes(&self) -> &[SectionNode] {
        &self.nodes
    }
}
