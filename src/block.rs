//! Block and span types - the stable output of parsing.

use crate::tool::ToolCall;
use bitflags::bitflags;

bitflags! {
    /// Semantic text styles (can be combined). Mapping styles to fonts
    /// and colors belongs to the renderer, not the parser.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpanStyle: u8 {
        const STRONG = 1;
        const EMPHASIS = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
    }
}

/// A styled run of plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub style: SpanStyle,
    /// Target URL when the run is a markdown link
    pub link: Option<String>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::empty(),
            link: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::empty(),
            link: Some(url.into()),
        }
    }
}

/// Inline elements within a paragraph or header line.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineSpan {
    /// Styled text run
    Text(TextRun),

    /// Inline code (`code`)
    Code(String),

    /// A recognized file path, rendered as a tappable pill
    FilePath(String),

    /// Break between source lines
    LineBreak,
}

/// One structural unit of content.
///
/// The id derives from the source line the block started on (e.g.
/// "text-L12"), not from content: unchanged prefix text keeps identical
/// ids across reparses, which is what lets a renderer diff successive
/// parses cheaply. Tool groups take their id from the first member call
/// instead, which is just as stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: String,
    kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Paragraph of inline spans
    Text { spans: Vec<InlineSpan> },

    /// Fenced code block. `is_closed` stays false while the closing
    /// fence hasn't streamed in yet - the block still renders, marked
    /// in-progress.
    Code {
        content: String,
        language: Option<String>,
        is_closed: bool,
    },

    /// Table rows, separator lines already dropped
    Table { rows: Vec<Vec<String>> },

    /// Blockquote content with the `>` markers stripped
    Blockquote { content: String },

    /// Thematic break
    HorizontalRule,

    /// Header with level 1-6
    Header { level: u8, spans: Vec<InlineSpan> },

    /// Tool calls anchored at one offset, children folded in after
    /// their parent
    ToolGroup { tools: Vec<ToolCall> },
}

impl Block {
    pub fn text(line: usize, spans: Vec<InlineSpan>) -> Self {
        Self {
            id: format!("text-L{line}"),
            kind: BlockKind::Text { spans },
        }
    }

    pub fn code(line: usize, content: String, language: Option<String>, is_closed: bool) -> Self {
        Self {
            id: format!("code-L{line}"),
            kind: BlockKind::Code {
                content,
                language,
                is_closed,
            },
        }
    }

    pub fn table(line: usize, rows: Vec<Vec<String>>) -> Self {
        Self {
            id: format!("table-L{line}"),
            kind: BlockKind::Table { rows },
        }
    }

    pub fn blockquote(line: usize, content: String) -> Self {
        Self {
            id: format!("quote-L{line}"),
            kind: BlockKind::Blockquote { content },
        }
    }

    pub fn horizontal_rule(line: usize) -> Self {
        Self {
            id: format!("hr-L{line}"),
            kind: BlockKind::HorizontalRule,
        }
    }

    pub fn header(line: usize, level: u8, spans: Vec<InlineSpan>) -> Self {
        Self {
            id: format!("header-L{line}"),
            kind: BlockKind::Header { level, spans },
        }
    }

    pub fn tool_group(tools: Vec<ToolCall>) -> Self {
        let id = match tools.first() {
            Some(call) => format!("tools-{}", call.id),
            None => "tools-empty".to_string(),
        };
        Self {
            id,
            kind: BlockKind::ToolGroup { tools },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    /// Header level when this is a header block.
    pub fn header_level(&self) -> Option<u8> {
        match &self.kind {
            BlockKind::Header { level, .. } => Some(*level),
            _ => None,
        }
    }
}
