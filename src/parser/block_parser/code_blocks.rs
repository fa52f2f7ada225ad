//! Fenced code block parsing.
//!
//! Fences are runs of at least three backticks or tildes. The close fence
//! must use the same character and be at least as long as the open fence.
//! The first word of the info string becomes the language hint.

use crate::ast::Block;
use crate::lines::ClassifiedLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FenceOpen {
    pub ch: char,
    pub len: usize,
}

/// Try to parse a fence-open line, returning the fence and language hint.
pub(crate) fn try_parse_fence_open(rest: &str) -> Option<(FenceOpen, Option<String>)> {
    let ch = match rest.chars().next() {
        Some(c @ ('`' | '~')) => c,
        _ => return None,
    };
    let len = rest.bytes().take_while(|&b| b == ch as u8).count();
    if len < 3 {
        return None;
    }
    let info = rest[len..].trim();
    // An info string containing backticks would be ambiguous with a code
    // span; reject it, matching CommonMark's backtick-fence rule.
    if ch == '`' && info.contains('`') {
        return None;
    }
    let language = info
        .split_whitespace()
        .next()
        .map(str::to_string);
    Some((FenceOpen { ch, len }, language))
}

fn is_fence_close(rest: &str, open: FenceOpen) -> bool {
    let trimmed = rest.trim_end();
    let len = trimmed
        .bytes()
        .take_while(|&b| b == open.ch as u8)
        .count();
    len >= open.len && len == trimmed.len()
}

/// Parse a fenced code block starting at `pos` (the fence-open line).
/// An unterminated fence runs to end of input.
pub(crate) fn parse_fenced_code_block(
    lines: &[ClassifiedLine],
    pos: usize,
) -> Option<(usize, Block)> {
    let open_line = lines.get(pos)?;
    let (fence, language) = try_parse_fence_open(open_line.rest())?;

    let mut text = String::new();
    let mut next = pos + 1;
    while next < lines.len() {
        let line = &lines[next];
        if line.indent < 4 && is_fence_close(line.rest(), fence) {
            next += 1;
            return Some((next, Block::CodeBlock { text, language }));
        }
        text.push_str(&line.text);
        text.push('\n');
        next += 1;
    }

    log::debug!("Unterminated code fence at line {}", pos + 1);
    Some((next, Block::CodeBlock { text, language }))
}
