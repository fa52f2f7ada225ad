//! Indented code block parsing.

use crate::ast::Block;
use crate::lines::{CODE_INDENT, ClassifiedLine};

/// Collect an indented code block starting at `pos` (a line indented at
/// least four columns). Blank lines between indented lines stay inside the
/// block; trailing blanks do not.
///
/// Exactly [`CODE_INDENT`] columns are stripped from each line.
pub(crate) fn parse_indented_code(
    lines: &[ClassifiedLine],
    pos: usize,
) -> (usize, Block) {
    let mut text = String::new();
    let mut next = pos;
    let mut pending_blanks = 0usize;

    while next < lines.len() {
        let line = &lines[next];
        if line.indent >= CODE_INDENT {
            for _ in 0..pending_blanks {
                text.push('\n');
            }
            pending_blanks = 0;
            text.push_str(&line.text[CODE_INDENT..]);
            text.push('\n');
            next += 1;
        } else if line.is_blank() {
            pending_blanks += 1;
            next += 1;
        } else {
            break;
        }
    }
    // Trailing blanks belong to whatever follows.
    next -= pending_blanks;

    (
        next,
        Block::CodeBlock {
            text,
            language: None,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::classify;

    #[test]
    fn test_simple_code_block() {
        let lines = classify("    let x = 1;\n    let y = 2;\npara");
        let (next, block) = parse_indented_code(&lines, 0);
        assert_eq!(next, 2);
        assert_eq!(
            block,
            Block::CodeBlock {
                text: "let x = 1;\nlet y = 2;\n".to_string(),
                language: None,
            }
        );
    }

    #[test]
    fn test_code_spans_internal_blanks() {
        let lines = classify("    a\n\n    b\npara");
        let (next, block) = parse_indented_code(&lines, 0);
        assert_eq!(next, 3);
        let Block::CodeBlock { text, .. } = block else {
            panic!("expected code block");
        };
        assert_eq!(text, "a\n\nb\n");
    }

    #[test]
    fn test_trailing_blanks_excluded() {
        let lines = classify("    a\n\n\npara");
        let (next, block) = parse_indented_code(&lines, 0);
        assert_eq!(next, 1);
        let Block::CodeBlock { text, .. } = block else {
            panic!("expected code block");
        };
        assert_eq!(text, "a\n");
    }

    #[test]
    fn test_extra_indent_preserved() {
        let lines = classify("        deep\n");
        let (_, block) = parse_indented_code(&lines, 0);
        let Block::CodeBlock { text, .. } = block else {
            panic!("expected code block");
        };
        assert_eq!(text, "    deep\n");
    }
}
