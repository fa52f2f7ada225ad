//! List marker parsing and item line collection.
//!
//! The driver owns the list loop (it needs to recurse into item content);
//! this module knows what a marker looks like and which lines belong to an
//! item. Looseness is decided by the driver at list-closure time from the
//! blank lines reported here.

use crate::ast::ListKind;
use crate::lines::{CODE_INDENT, ClassifiedLine, LineKind};

use super::code_blocks::try_parse_fence_open;
use super::horizontal_rules::try_parse_horizontal_rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListMarkerInfo {
    pub kind: ListKind,
    /// Columns of indent before the marker.
    pub indent: usize,
    /// Column where item content starts (marker plus following spaces).
    pub content_col: usize,
}

/// Try to parse a list marker from a line.
///
/// Bullets are `-`, `*`, or `+` followed by a space; ordered markers are a
/// digit run followed by `.` and a space. A marker alone on its line opens
/// an empty item.
pub(crate) fn try_parse_list_marker(line: &ClassifiedLine) -> Option<ListMarkerInfo> {
    if line.indent >= CODE_INDENT {
        return None;
    }
    let rest = line.rest();
    let first = rest.chars().next()?;

    let (kind, marker_width) = if matches!(first, '-' | '*' | '+') {
        (ListKind::Bullet(first), 1)
    } else if first.is_ascii_digit() {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if !rest[digits..].starts_with('.') {
            return None;
        }
        (ListKind::Ordered, digits + 1)
    } else {
        return None;
    };

    let after = &rest[marker_width..];
    let spaces = after.bytes().take_while(|&b| b == b' ').count();
    if !after.is_empty() && spaces == 0 {
        return None;
    }
    // More than four spaces after the marker means the item starts with
    // indented code; content begins one column past the marker.
    let content_col = if spaces > 4 || after.is_empty() {
        line.indent + marker_width + 1
    } else {
        line.indent + marker_width + spaces
    };

    Some(ListMarkerInfo {
        kind,
        indent: line.indent,
        content_col,
    })
}

/// Does this line start a block that interrupts item content at lower
/// indent, rather than lazily continuing a paragraph?
fn interrupts_item(line: &ClassifiedLine) -> bool {
    if line.kind != LineKind::Text {
        return true;
    }
    let rest = line.rest();
    try_parse_horizontal_rule(rest).is_some() || try_parse_fence_open(rest).is_some()
}

/// Collect the lines belonging to one list item.
///
/// Returns the position after the item, the dedented item lines, and
/// whether the item was followed by a blank line (the driver uses this to
/// mark the list loose when another item follows).
pub(crate) fn collect_item_lines(
    lines: &[ClassifiedLine],
    pos: usize,
    info: ListMarkerInfo,
) -> (usize, Vec<ClassifiedLine>, bool) {
    let first = &lines[pos];
    let content = if first.text.len() > info.content_col {
        first.text[info.content_col..].to_string()
    } else {
        String::new()
    };
    let mut item = vec![ClassifiedLine::reclassify(content)];

    let mut next = pos + 1;
    let mut pending_blanks = 0usize;

    while next < lines.len() {
        let line = &lines[next];
        if line.is_blank() {
            pending_blanks += 1;
            next += 1;
            continue;
        }
        if line.indent >= info.content_col {
            for _ in 0..pending_blanks {
                item.push(ClassifiedLine::reclassify(String::new()));
            }
            pending_blanks = 0;
            item.push(line.strip_columns(info.content_col));
            next += 1;
            continue;
        }
        if pending_blanks == 0 {
            if try_parse_list_marker(line).is_some() || interrupts_item(line) {
                break;
            }
            // Lazy paragraph continuation.
            item.push(line.clone());
            next += 1;
            continue;
        }
        break;
    }

    let trailing_blank = pending_blanks > 0;
    (next - pending_blanks, item, trailing_blank)
}
