//! Footnote definitions and the footnote table.
//!
//! Footnote definitions have the form:
//! ```markdown
//! [^label]: Footnote content.
//!     Continuation lines are indented four columns
//!     and may contain any block structure.
//! ```
//!
//! Definitions are collected into a side table keyed by case-normalized
//! label, decoupled from the main block tree, and rendered once at document
//! end. Reference-order numbering is assigned at render time, so the table
//! itself never changes after compilation.

use std::collections::HashMap;

use crate::ast::Block;
use crate::lines::{CODE_INDENT, ClassifiedLine, LineKind};

use super::utils::{find_label_end, normalize_label};

/// One footnote definition: the label as written plus its block content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootnoteDefinition {
    pub label: String,
    pub blocks: Vec<Block>,
}

/// Side table of footnote definitions keyed by normalized label.
///
/// Labels are unique: a definition with a duplicate label is discarded
/// (first wins). Unreferenced definitions stay in the table and are
/// observable through [`crate::Document::footnote`], they just never reach
/// the HTML output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootnoteTable {
    entries: HashMap<String, FootnoteDefinition>,
    /// Normalized labels in definition order, for deterministic inspection.
    order: Vec<String>,
}

impl FootnoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. Returns false (and drops the definition) if the
    /// label is already taken.
    pub fn insert(&mut self, definition: FootnoteDefinition) -> bool {
        let key = normalize_label(&definition.label);
        if self.entries.contains_key(&key) {
            log::debug!("Dropping duplicate footnote definition [^{}]", key);
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, definition);
        true
    }

    /// Look up a definition by label (case-insensitive).
    pub fn get(&self, label: &str) -> Option<&FootnoteDefinition> {
        self.entries.get(&normalize_label(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(&normalize_label(label))
    }

    /// Normalized labels in definition order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Try to parse the `[^label]:` marker at the start of a line's content.
/// Returns the label and the byte offset where inline content starts.
pub(crate) fn try_parse_footnote_marker(rest: &str) -> Option<(&str, usize)> {
    if !rest.starts_with("[^") {
        return None;
    }
    let close = find_label_end(rest, 0)?;
    let label = &rest[2..close];
    if label.is_empty() {
        return None;
    }
    let mut pos = close + 1;
    if rest.as_bytes().get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;
    while rest.as_bytes().get(pos) == Some(&b' ') {
        pos += 1;
    }
    Some((label, pos))
}

/// Collect a footnote definition starting at `pos`.
///
/// Returns the position after the definition, the label, and the dedented
/// body lines (ready for a recursive block parse). Continuation lines are
/// indented at least four columns; a blank line continues the definition
/// only when indented content follows. An unindented line directly after
/// body text is a lazy paragraph continuation.
pub(crate) fn collect_footnote_definition(
    lines: &[ClassifiedLine],
    pos: usize,
) -> Option<(usize, String, Vec<ClassifiedLine>)> {
    let first = lines.get(pos)?;
    if first.kind != LineKind::FootnoteDefinition {
        return None;
    }
    let (label, content_start) = try_parse_footnote_marker(&first.text)?;
    let label = label.to_string();

    let mut body = vec![ClassifiedLine::reclassify(
        first.text[content_start..].to_string(),
    )];
    let mut next = pos + 1;
    let mut previous_was_blank = false;

    while next < lines.len() {
        let line = &lines[next];
        if line.is_blank() {
            // Keep the blank only if indented content follows.
            let mut peek = next + 1;
            while peek < lines.len() && lines[peek].is_blank() {
                peek += 1;
            }
            let continues = peek < lines.len() && lines[peek].indent >= CODE_INDENT;
            if !continues {
                break;
            }
            body.push(line.clone());
            previous_was_blank = true;
            next += 1;
            continue;
        }
        if line.indent >= CODE_INDENT {
            body.push(line.strip_columns(CODE_INDENT));
            previous_was_blank = false;
            next += 1;
            continue;
        }
        if previous_was_blank {
            break;
        }
        // Lazy continuation of the current paragraph.
        if line.kind == LineKind::Text {
            body.push(line.clone());
            next += 1;
            continue;
        }
        break;
    }

    log::debug!(
        "Collected footnote definition [^{}] spanning {} lines",
        label,
        next - pos
    );
    Some((next, label, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::classify;

    #[test]
    fn test_parse_marker() {
        assert_eq!(
            try_parse_footnote_marker("[^1]: note"),
            Some(("1", 6)),
        );
        assert_eq!(
            try_parse_footnote_marker("[^long label]:note"),
            Some(("long label", 14)),
        );
    }

    #[test]
    fn test_marker_requires_colon() {
        assert_eq!(try_parse_footnote_marker("[^1] note"), None);
        assert_eq!(try_parse_footnote_marker("[^]: empty"), None);
        assert_eq!(try_parse_footnote_marker("[not a footnote]"), None);
    }

    #[test]
    fn test_collect_single_line() {
        let lines = classify("[^a]: the note\n\nafter");
        let (next, label, body) = collect_footnote_definition(&lines, 0).unwrap();
        assert_eq!(next, 1);
        assert_eq!(label, "a");
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].text, "the note");
    }

    #[test]
    fn test_collect_indented_continuation() {
        let lines = classify("[^a]: first\n    second\n\n    third para\nafter");
        let (next, _, body) = collect_footnote_definition(&lines, 0).unwrap();
        assert_eq!(next, 4);
        let texts: Vec<&str> = body.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "", "third para"]);
    }

    #[test]
    fn test_lazy_continuation() {
        let lines = classify("[^a]: first\nstill the note\n\nafter");
        let (next, _, body) = collect_footnote_definition(&lines, 0).unwrap();
        assert_eq!(next, 2);
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn test_blank_then_unindented_ends_definition() {
        let lines = classify("[^a]: first\n\nnot the note");
        let (next, _, body) = collect_footnote_definition(&lines, 0).unwrap();
        assert_eq!(next, 1);
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn test_table_first_definition_wins() {
        let mut table = FootnoteTable::new();
        assert!(table.insert(FootnoteDefinition {
            label: "A".to_string(),
            blocks: vec![],
        }));
        assert!(!table.insert(FootnoteDefinition {
            label: "a".to_string(),
            blocks: vec![Block::HorizontalRule],
        }));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a").unwrap().label, "A");
    }

    #[test]
    fn test_table_case_insensitive_lookup() {
        let mut table = FootnoteTable::new();
        table.insert(FootnoteDefinition {
            label: "Note".to_string(),
            blocks: vec![],
        });
        assert!(table.contains("note"));
        assert!(table.contains("NOTE"));
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["note"]);
    }
}
