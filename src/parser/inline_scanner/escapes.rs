//! Backslash escape parsing.

/// Result of parsing a backslash at the start of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Escape {
    /// `\x` where x is ASCII punctuation: the literal character, consuming
    /// the given byte length.
    Literal(char, usize),
    /// A backslash at end of line: a hard line break.
    HardBreak(usize),
}

/// Try to parse a backslash escape. A backslash before anything other than
/// punctuation or a newline is literal and returns None.
pub(crate) fn try_parse_escape(text: &str) -> Option<Escape> {
    debug_assert!(text.starts_with('\\'));
    match text[1..].chars().next() {
        Some('\n') => Some(Escape::HardBreak(2)),
        Some(ch) if ch.is_ascii_punctuation() => Some(Escape::Literal(ch, 2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escaped_punctuation() {
        assert_eq!(try_parse_escape("\\*text"), Some(Escape::Literal('*', 2)));
        assert_eq!(try_parse_escape("\\["), Some(Escape::Literal('[', 2)));
        assert_eq!(try_parse_escape("\\\\"), Some(Escape::Literal('\\', 2)));
    }

    #[test]
    fn test_backslash_before_letter_is_literal() {
        assert_eq!(try_parse_escape("\\a"), None);
        assert_eq!(try_parse_escape("\\ "), None);
    }

    #[test]
    fn test_backslash_at_line_end() {
        assert_eq!(try_parse_escape("\\\nnext"), Some(Escape::HardBreak(2)));
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(try_parse_escape("\\"), None);
    }
}
