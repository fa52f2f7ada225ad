//! Blockquote marker handling.
//!
//! The block parser strips one `>` level per nesting step and re-parses the
//! inner lines, so nesting depth falls out of recursion rather than explicit
//! depth tracking.

use crate::lines::{ClassifiedLine, LineKind};

/// Strip one `>` marker (plus one following space, if any) from a quote line.
pub(crate) fn strip_quote_marker(line: &ClassifiedLine) -> ClassifiedLine {
    let rest = line.rest();
    debug_assert!(rest.starts_with('>'));
    let mut inner = &rest[1..];
    if let Some(stripped) = inner.strip_prefix(' ') {
        inner = stripped;
    }
    ClassifiedLine::reclassify(inner.to_string())
}

/// Collect a blockquote starting at `pos`.
///
/// Returns the position after the quote and the inner lines with one marker
/// level stripped. Quoted blank lines (`>` alone) and blank lines followed by
/// another quote line stay inside the quote; paragraph text directly below a
/// quote line is a lazy continuation.
pub(crate) fn collect_blockquote(
    lines: &[ClassifiedLine],
    pos: usize,
) -> (usize, Vec<ClassifiedLine>) {
    let mut inner = Vec::new();
    let mut next = pos;
    let mut previous_was_blank = false;

    while next < lines.len() {
        let line = &lines[next];
        if line.kind == LineKind::QuoteMarker {
            inner.push(strip_quote_marker(line));
            previous_was_blank = inner.last().is_some_and(ClassifiedLine::is_blank);
            next += 1;
            continue;
        }
        if line.is_blank() {
            // The quote spans the blank only if more quoted lines follow.
            let mut peek = next + 1;
            while peek < lines.len() && lines[peek].is_blank() {
                peek += 1;
            }
            if peek < lines.len() && lines[peek].kind == LineKind::QuoteMarker {
                inner.push(ClassifiedLine::reclassify(String::new()));
                previous_was_blank = true;
                next += 1;
                continue;
            }
            break;
        }
        // Lazy continuation: unquoted paragraph text directly below a quoted
        // line stays in the quote.
        if !previous_was_blank && line.kind == LineKind::Text && line.indent < 4 {
            inner.push(line.clone());
            next += 1;
            continue;
        }
        break;
    }

    (next, inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::classify;

    #[test]
    fn test_strip_marker_with_space() {
        let line = ClassifiedLine::reclassify("> quoted".to_string());
        assert_eq!(strip_quote_marker(&line).text, "quoted");
    }

    #[test]
    fn test_strip_marker_without_space() {
        let line = ClassifiedLine::reclassify(">quoted".to_string());
        assert_eq!(strip_quote_marker(&line).text, "quoted");
    }

    #[test]
    fn test_strip_nested_marker_one_level() {
        let line = ClassifiedLine::reclassify("> > deep".to_string());
        let inner = strip_quote_marker(&line);
        assert_eq!(inner.text, "> deep");
        assert_eq!(inner.kind, LineKind::QuoteMarker);
    }

    #[test]
    fn test_collect_simple_quote() {
        let lines = classify("> a\n> b\nafter para\n\nplain");
        let (next, inner) = collect_blockquote(&lines, 0);
        // Lazy continuation pulls in the unquoted paragraph line.
        assert_eq!(next, 3);
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[2].text, "after para");
    }

    #[test]
    fn test_quote_spans_blank_before_more_quote() {
        let lines = classify("> a\n\n> b\nplain");
        let (next, inner) = collect_blockquote(&lines, 0);
        assert_eq!(next, 3);
        assert!(inner[1].is_blank());
    }

    #[test]
    fn test_quote_ends_at_final_blank() {
        let lines = classify("> a\n\nplain");
        let (next, _) = collect_blockquote(&lines, 0);
        assert_eq!(next, 1);
    }
}
