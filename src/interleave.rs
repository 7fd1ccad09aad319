//! Splices tool-call groups into parsed text at their recorded offsets.

use crate::block::Block;
use crate::parser::{parse_blocks, parse_blocks_from};
use crate::tool::ToolCall;

/// Merge turn text and tool calls into one block list.
///
/// Top-level calls are laid out at their text positions in ascending
/// order; calls without a position land before any text. Consecutive
/// calls with no text between them share one group. Child calls always
/// fold into their parent's group and never appear standalone.
///
/// Positions are char offsets. An offset beyond the text clamps to the
/// end, so a call recorded against a longer draft still renders.
pub fn interleave(text: &str, calls: &[ToolCall]) -> Vec<Block> {
    let mut top_level: Vec<&ToolCall> = calls.iter().filter(|call| call.is_top_level()).collect();
    if top_level.is_empty() {
        return parse_blocks(text);
    }

    // Stable sort keeps arrival order for equal positions
    top_level.sort_by_key(|call| call.text_position.unwrap_or(0));

    let total_chars = text.chars().count();
    let mut blocks = Vec::new();
    let mut pending: Vec<&ToolCall> = Vec::new();
    let mut cursor = 0usize;
    let mut cursor_byte = 0usize;
    let mut line_offset = 0usize;

    for call in top_level {
        let position = call.text_position.unwrap_or(0).min(total_chars);
        if position > cursor {
            flush_group(&mut blocks, &mut pending, calls);

            let advance = position - cursor;
            let slice_end = match text[cursor_byte..].char_indices().nth(advance) {
                Some((offset, _)) => cursor_byte + offset,
                None => text.len(),
            };
            let slice = &text[cursor_byte..slice_end];
            blocks.extend(parse_blocks_from(slice, line_offset));

            line_offset += slice.matches('\n').count();
            cursor = position;
            cursor_byte = slice_end;
        }
        pending.push(call);
    }

    flush_group(&mut blocks, &mut pending, calls);

    if cursor_byte < text.len() {
        blocks.extend(parse_blocks_from(&text[cursor_byte..], line_offset));
    }

    blocks
}

/// Emit the buffered calls as one group, folding each member's children
/// in directly after it.
fn flush_group(blocks: &mut Vec<Block>, pending: &mut Vec<&ToolCall>, all: &[ToolCall]) {
    if pending.is_empty() {
        return;
    }

    let mut tools: Vec<ToolCall> = Vec::new();
    for member in pending.drain(..) {
        tools.push(member.clone());
        for call in all {
            if call.parent_id.as_deref() == Some(member.id.as_str()) {
                tools.push(call.clone());
            }
        }
    }

    blocks.push(Block::tool_group(tools));
}
