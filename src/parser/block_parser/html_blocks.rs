//! Raw HTML block parsing.
//!
//! A line opening a known block-level HTML tag (or an HTML comment), when no
//! other container is open, starts a raw block that is consumed verbatim
//! until a blank line. Content passes through the renderer untouched: the
//! engine does not sanitize embedded HTML.

use crate::ast::Block;
use crate::lines::ClassifiedLine;

/// HTML block-level tags that open a raw HTML block at the start of a line.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "del",
    "details",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "iframe",
    "ins",
    "main",
    "menu",
    "nav",
    "noframes",
    "noscript",
    "ol",
    "p",
    "pre",
    "script",
    "section",
    "style",
    "table",
    "ul",
];

/// Check whether line content opens an HTML block.
pub(crate) fn is_html_block_start(rest: &str) -> bool {
    if !rest.starts_with('<') {
        return false;
    }
    if rest.starts_with("<!--") {
        return true;
    }
    let mut tag = &rest[1..];
    if let Some(stripped) = tag.strip_prefix('/') {
        tag = stripped;
    }
    let name_len = tag
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return false;
    }
    let name = tag[..name_len].to_ascii_lowercase();
    let after = tag[name_len..].chars().next();
    let delimited = matches!(after, None | Some(' ' | '>' | '/'));
    delimited && BLOCK_TAGS.contains(&name.as_str())
}

/// Consume a raw HTML block: lines verbatim until a blank line.
pub(crate) fn parse_html_block(lines: &[ClassifiedLine], pos: usize) -> (usize, Block) {
    let mut text = String::new();
    let mut next = pos;
    while next < lines.len() && !lines[next].is_blank() {
        text.push_str(&lines[next].text);
        text.push('\n');
        next += 1;
    }
    (next, Block::RawHtml { text })
}
