//! Tool-call model consumed by the interleaver.
//!
//! The session layer owns tool calls and mutates them as results stream
//! in; the parsing side only reads them. Positions are char offsets into
//! the turn text, recorded at the moment the call began.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolState {
    #[default]
    Pending,
    Executing,
    Complete,
}

/// One tool invocation anchored to an offset in the turn text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,

    pub name: String,

    /// Raw JSON argument payload as delivered by the transport
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Set when this call ran under a parent task. Such calls fold into
    /// the parent's group and never appear top-level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Char offset into the turn text where the call fired. Missing for
    /// calls that arrived before any text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<usize>,

    #[serde(default)]
    pub state: ToolState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_output: Option<String>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input: None,
            parent_id: None,
            text_position: None,
            state: ToolState::default(),
            result_summary: None,
            result_output: None,
        }
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.text_position = Some(position);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Parse the raw argument payload. Unparseable or absent input is
    /// `None` - display falls back to the raw string.
    pub fn input_value(&self) -> Option<Value> {
        serde_json::from_str(self.input.as_deref()?).ok()
    }
}

/// The ordered tool calls of one turn, plus a revision counter bumped on
/// every mutation. The parse cache keys on the revision, so an in-place
/// state transition invalidates it even though the list length never
/// changed.
#[derive(Debug, Clone, Default)]
pub struct ToolCallList {
    calls: Vec<ToolCall>,
    revision: u64,
}

impl ToolCallList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, call: ToolCall) {
        self.calls.push(call);
        self.revision += 1;
    }

    /// Mutate the call with the given id. Returns false when no call
    /// matches.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut ToolCall)) -> bool {
        let Some(call) = self.calls.iter_mut().find(|call| call.id == id) else {
            return false;
        };
        f(call);
        self.revision += 1;
        true
    }

    pub fn set_state(&mut self, id: &str, state: ToolState) -> bool {
        self.update(id, |call| call.state = state)
    }

    /// Shift every recorded position down by `delta`, saturating at
    /// zero. The session layer calls this after trimming leading
    /// whitespace from a finished turn's text.
    pub fn rebase_positions(&mut self, delta: usize) {
        if delta == 0 {
            return;
        }
        for call in &mut self.calls {
            if let Some(position) = call.text_position {
                call.text_position = Some(position.saturating_sub(delta));
            }
        }
        self.revision += 1;
    }

    pub fn calls(&self) -> &[ToolCall] {
        &self.calls
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl From<Vec<ToolCall>> for ToolCallList {
    fn from(calls: Vec<ToolCall>) -> Self {
        Self { calls, revision: 0 }
    }
}
