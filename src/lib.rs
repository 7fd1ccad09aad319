//! Streaming content engine for chat UIs: markdown blocks interleaved
//! with offset-anchored tool calls, nested into collapsible sections.
//!
//! Built for assistant output that arrives token by token. Every prefix
//! of the stream parses to something renderable - an unterminated code
//! fence is an open code block, a half-typed table row is withheld
//! until its newline lands - and block ids derive from source line
//! indices so they stay stable as text is appended. Renderers diff on
//! those ids instead of re-laying-out the whole turn.
//!
//! The pipeline is pure and synchronous: [`parse_blocks`] for plain
//! markdown, [`interleave`] to splice tool-call groups in at their
//! recorded offsets, [`build_section_tree`] to nest blocks under
//! headers, and [`ParseCache`] to memoize the whole chain per frame.

mod block;
mod cache;
mod inline;
mod interleave;
mod parser;
mod section;
mod tool;

pub use block::{Block, BlockKind, InlineSpan, SpanStyle, TextRun};
pub use cache::{ParseCache, StreamState};
pub use inline::{parse_inline, parse_line};
pub use interleave::interleave;
pub use parser::parse_blocks;
pub use section::{build_section_tree, CollapsedSections, SectionNode};
pub use tool::{ToolCall, ToolCallList, ToolState};
