//! Block-level parsing with streaming guards.
//!
//! One forward pass over the lines. Constructs that are ambiguous at
//! the stream tail (a table row with no newline yet, a rule that might
//! become a separator) are held back until more input settles them.

use crate::block::Block;
use crate::inline::{parse_inline, parse_line};

/// Parse markdown text into blocks. Total over any input, including
/// empty text and half-typed constructs.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    parse_blocks_from(text, 0)
}

/// Parse a slice of a larger source. `first_line` offsets the line
/// indices baked into block ids, so ids stay global to the full text
/// when the interleaver parses segments separately.
pub(crate) fn parse_blocks_from(text: &str, first_line: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let lines: Vec<&str> = text.split('\n').collect();
    let has_final_newline = text.ends_with('\n');
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        let start = i;

        // Code fence - consume until the closing fence or end of input
        if line.starts_with("```") {
            let language = line[3..].trim();
            let language = (!language.is_empty()).then(|| language.to_string());

            let mut content: Vec<&str> = Vec::new();
            let mut closed = false;
            i += 1;
            while i < lines.len() {
                if lines[i].starts_with("```") {
                    closed = true;
                    i += 1;
                    break;
                }
                content.push(lines[i]);
                i += 1;
            }

            blocks.push(Block::code(
                first_line + start,
                content.join("\n"),
                language,
                closed,
            ));
            continue;
        }

        // Table - any line containing a pipe. Checked before the rule
        // so a lone "|---|" separator emits nothing rather than a rule.
        if is_table_line(trimmed) {
            let mut rows: Vec<Vec<String>> = Vec::new();
            while i < lines.len() {
                let row_line = lines[i];
                if !is_table_line(row_line.trim()) {
                    break;
                }

                // Separator row: dashes and pipes, no letters
                let is_separator =
                    row_line.contains('-') && !row_line.chars().any(char::is_alphabetic);
                if is_separator {
                    i += 1;
                    continue;
                }

                // The last line with no newline yet is still being
                // typed - consume it but commit nothing
                let is_streaming_row = i == lines.len() - 1 && !has_final_newline;
                if !is_streaming_row {
                    let cells: Vec<String> = row_line
                        .split('|')
                        .filter(|cell| !cell.is_empty())
                        .map(|cell| cell.trim().to_string())
                        .collect();
                    if !cells.is_empty() {
                        rows.push(cells);
                    }
                }
                i += 1;
            }

            if !rows.is_empty() {
                blocks.push(Block::table(first_line + start, rows));
            }
            continue;
        }

        // Blockquote run - strip one marker per line
        if trimmed.starts_with('>') {
            let mut quoted: Vec<String> = Vec::new();
            while i < lines.len() {
                let Some(inner) = lines[i].trim().strip_prefix('>') else {
                    break;
                };
                quoted.push(inner.trim().to_string());
                i += 1;
            }
            blocks.push(Block::blockquote(first_line + start, quoted.join("\n")));
            continue;
        }

        // Horizontal rule - never on the last line, where "---" may
        // still grow into a table separator or more dashes
        let is_last = i == lines.len() - 1;
        if is_horizontal_rule(trimmed) && !is_last {
            blocks.push(Block::horizontal_rule(first_line + start));
            i += 1;
            continue;
        }

        // Header - exactly one line
        if let Some((level, content)) = header_line(trimmed) {
            blocks.push(Block::header(first_line + start, level, parse_line(content)));
            i += 1;
            continue;
        }

        // Paragraph - accumulate until any other block starts
        let mut text_lines: Vec<&str> = Vec::new();
        while i < lines.len() {
            let para_line = lines[i];
            let para_trimmed = para_line.trim();
            if para_line.starts_with("```")
                || is_table_line(para_trimmed)
                || para_trimmed.starts_with('>')
                || (is_horizontal_rule(para_trimmed) && i < lines.len() - 1)
                || header_line(para_trimmed).is_some()
            {
                break;
            }
            text_lines.push(para_line);
            i += 1;
        }

        let content = text_lines.join("\n");
        if !content.trim().is_empty() {
            blocks.push(Block::text(first_line + start, parse_inline(&content)));
        }
    }

    blocks
}

fn is_table_line(trimmed: &str) -> bool {
    trimmed.contains('|')
}

/// Three or more of the same rule char, optionally space-separated.
fn is_horizontal_rule(trimmed: &str) -> bool {
    if trimmed.chars().count() < 3 {
        return false;
    }
    rule_of(trimmed, '-') || rule_of(trimmed, '*') || rule_of(trimmed, '_')
}

fn rule_of(line: &str, marker: char) -> bool {
    line.chars().all(|c| c == marker || c == ' ')
        && line.chars().filter(|&c| c == marker).count() >= 3
}

/// Header marker: one to six `#` then a space. Returns the level and
/// the content after the space.
fn header_line(trimmed: &str) -> Option<(u8, &str)> {
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let content = trimmed[level..].strip_prefix(' ')?;
    Some((level as u8, content))
}
