//! Inline parsing: emphasis, code spans, file paths, links and list
//! glyph substitution.

use crate::block::{InlineSpan, SpanStyle, TextRun};

/// Extensions that qualify a token as a file path. Anything else stays
/// plain text or inline code.
const PATH_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "webp", "heic", "svg",
    // code
    "swift", "py", "js", "ts", "jsx", "tsx", "go", "rs", "rb", "java", "kt", "c", "cpp", "h", "m",
    "cs", "php", "sh", "bash", "zsh",
    // data and docs
    "md", "json", "yaml", "yml", "csv", "tsv", "html", "htm",
    // markup and config
    "css", "scss", "xml", "toml", "plist",
    // text
    "txt", "log", "rtf",
];

/// Absolute-path prefixes recognized in bare (unbackticked) text.
const PATH_PREFIXES: &[&str] = &[
    "/Users/", "/home/", "/tmp/", "/var/", "/etc/", "/opt/", "/usr/", "/srv/", "~/",
];

/// Parse multi-line text into inline spans, with a `LineBreak` between
/// source lines and list prefixes swapped for display glyphs.
pub fn parse_inline(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let lines: Vec<&str> = text.split('\n').collect();

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let indent = line.chars().take_while(|&c| c == ' ' || c == '\t').count();
        let indent_pad = "  ".repeat(indent / 2);

        if let Some(rest) = trimmed.strip_prefix("- [x] ") {
            spans.push(InlineSpan::Text(TextRun::plain(format!("{indent_pad}☑ "))));
            spans.extend(parse_line(rest));
        } else if let Some(rest) = trimmed.strip_prefix("- [ ] ") {
            spans.push(InlineSpan::Text(TextRun::plain(format!("{indent_pad}☐ "))));
            spans.extend(parse_line(rest));
        } else if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            spans.push(InlineSpan::Text(TextRun::plain(format!("{indent_pad}• "))));
            spans.extend(parse_line(rest));
        } else if has_ordered_prefix(trimmed) {
            // Keep the number itself, only add the indent
            if !indent_pad.is_empty() {
                spans.push(InlineSpan::Text(TextRun::plain(indent_pad)));
            }
            spans.extend(parse_line(trimmed));
        } else {
            spans.extend(parse_line(line));
        }

        if index < lines.len() - 1 {
            spans.push(InlineSpan::LineBreak);
        }
    }

    collapse_plain_runs(&mut spans);
    spans
}

/// Parse a single line into inline spans. Total over any input: markers
/// that don't form a construct come through as literal text.
pub fn parse_line(line: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        // Escaped character - emit the next char literally
        if let Some(after) = rest.strip_prefix('\\') {
            if let Some(c) = after.chars().next() {
                plain.push(c);
                rest = &after[c.len_utf8()..];
            } else {
                // Lone trailing backslash
                plain.push('\\');
                rest = after;
            }
            continue;
        }

        // Bold italic
        if rest.starts_with("***") || rest.starts_with("___") {
            let marker = &rest[..3];
            flush_plain(&mut spans, &mut plain);
            let (inner, after) = split_at_marker(&rest[3..], marker);
            let mut styled = parse_line(inner);
            apply_style(&mut styled, SpanStyle::STRONG | SpanStyle::EMPHASIS);
            spans.extend(styled);
            rest = after;
            continue;
        }

        // Strikethrough
        if rest.starts_with("~~") {
            flush_plain(&mut spans, &mut plain);
            let (inner, after) = split_at_marker(&rest[2..], "~~");
            let mut styled = parse_line(inner);
            apply_style(&mut styled, SpanStyle::STRIKETHROUGH);
            spans.extend(styled);
            rest = after;
            continue;
        }

        // Bold
        if rest.starts_with("**") || rest.starts_with("__") {
            let marker = &rest[..2];
            flush_plain(&mut spans, &mut plain);
            let (inner, after) = split_at_marker(&rest[2..], marker);
            let mut styled = parse_line(inner);
            apply_style(&mut styled, SpanStyle::STRONG);
            spans.extend(styled);
            rest = after;
            continue;
        }

        // Italic - a marker followed by whitespace or end of line is
        // literal, so "2 * 3" survives
        if let Some(marker @ ('*' | '_')) = rest.chars().next() {
            let after_marker = &rest[1..];
            let opens = after_marker
                .chars()
                .next()
                .map(|c| !c.is_whitespace())
                .unwrap_or(false);
            if opens {
                flush_plain(&mut spans, &mut plain);
                let (inner, after) = split_at_char(after_marker, marker);
                let mut styled = parse_line(inner);
                apply_style(&mut styled, SpanStyle::EMPHASIS);
                spans.extend(styled);
                rest = after;
            } else {
                plain.push(marker);
                rest = after_marker;
            }
            continue;
        }

        // Inline code, re-classified as a path when it looks like one
        if let Some(after_tick) = rest.strip_prefix('`') {
            flush_plain(&mut spans, &mut plain);
            let (code, after) = split_at_char(after_tick, '`');
            if is_file_path(code) {
                spans.push(InlineSpan::FilePath(code.to_string()));
            } else {
                spans.push(InlineSpan::Code(code.to_string()));
            }
            rest = after;
            continue;
        }

        // Bare absolute path
        if let Some(len) = bare_path_len(rest) {
            flush_plain(&mut spans, &mut plain);
            spans.push(InlineSpan::FilePath(rest[..len].to_string()));
            rest = &rest[len..];
            continue;
        }

        // Link
        if rest.starts_with('[') {
            if let Some((text, url, consumed)) = parse_link(rest) {
                flush_plain(&mut spans, &mut plain);
                spans.push(InlineSpan::Text(TextRun::linked(text, url)));
                rest = &rest[consumed..];
                continue;
            }
        }

        if let Some(c) = rest.chars().next() {
            plain.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    flush_plain(&mut spans, &mut plain);
    collapse_plain_runs(&mut spans);
    spans
}

fn has_ordered_prefix(line: &str) -> bool {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// Split at the closing marker. An unclosed construct consumes the rest
/// of the line, so half-typed styling shows up while streaming.
fn split_at_marker<'a>(text: &'a str, marker: &str) -> (&'a str, &'a str) {
    match text.find(marker) {
        Some(idx) => (&text[..idx], &text[idx + marker.len()..]),
        None => (text, ""),
    }
}

fn split_at_char(text: &str, marker: char) -> (&str, &str) {
    match text.find(marker) {
        Some(idx) => (&text[..idx], &text[idx + marker.len_utf8()..]),
        None => (text, ""),
    }
}

/// Union the style onto every text run. Code, paths and breaks keep
/// their own presentation.
fn apply_style(spans: &mut [InlineSpan], style: SpanStyle) {
    for span in spans.iter_mut() {
        if let InlineSpan::Text(run) = span {
            run.style |= style;
        }
    }
}

fn flush_plain(spans: &mut Vec<InlineSpan>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(InlineSpan::Text(TextRun::plain(std::mem::take(plain))));
    }
}

/// Collapse adjacent unlinked text runs with the same style into one.
fn collapse_plain_runs(spans: &mut Vec<InlineSpan>) {
    if spans.len() < 2 {
        return;
    }

    let mut write = 0;
    for read in 1..spans.len() {
        let mergeable = match (&spans[write], &spans[read]) {
            (InlineSpan::Text(a), InlineSpan::Text(b)) => {
                a.style == b.style && a.link.is_none() && b.link.is_none()
            }
            _ => false,
        };

        if mergeable {
            let text = match &spans[read] {
                InlineSpan::Text(run) => run.text.clone(),
                _ => String::new(),
            };
            if let InlineSpan::Text(run) = &mut spans[write] {
                run.text.push_str(&text);
            }
        } else {
            write += 1;
            if write != read {
                spans.swap(write, read);
            }
        }
    }

    spans.truncate(write + 1);
}

/// Parse `[text](url)` starting at a `[`. Returns the link text, the
/// url and the total bytes consumed. Bracket and paren depth are
/// tracked so nested brackets in the text and parens in the url work.
fn parse_link(text: &str) -> Option<(&str, &str, usize)> {
    let mut depth = 0i32;
    let mut bracket_end = None;
    for (i, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    bracket_end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let bracket_end = bracket_end?;

    let rest = &text[bracket_end + 1..];
    if !rest.starts_with('(') {
        return None;
    }

    let mut paren_depth = 0i32;
    let mut paren_end = None;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => paren_depth += 1,
            ')' => {
                paren_depth -= 1;
                if paren_depth == 0 {
                    paren_end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }
    let paren_end = paren_end?;

    let link_text = &text[1..bracket_end];
    let url = &rest[1..paren_end];
    Some((link_text, url, bracket_end + 1 + paren_end + 1))
}

/// Length of a bare path token at the start of `text`, if it begins
/// with a known absolute prefix and carries an allowed extension.
/// Trailing sentence punctuation is left out of the token.
fn bare_path_len(text: &str) -> Option<usize> {
    if !PATH_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return None;
    }

    let token_end = text.find(char::is_whitespace).unwrap_or(text.len());
    let token = text[..token_end]
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')'));
    if token.is_empty() || !is_file_path(token) {
        return None;
    }

    Some(token.len())
}

/// True when the token ends in an allowed extension. Case-insensitive
/// on the extension only.
fn is_file_path(token: &str) -> bool {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return false;
    }

    match token.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            PATH_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}
