//! Inline code span parsing.

/// Try to parse a code span starting at the current position.
/// Returns (total_len, content) if successful.
///
/// A run of backticks opens a span closed by a run of exactly equal length;
/// content is taken verbatim, and all other inline recognition is
/// suppressed inside it.
pub(crate) fn try_parse_code_span(text: &str) -> Option<(usize, &str)> {
    let opening = text.bytes().take_while(|&b| b == b'`').count();
    if opening == 0 {
        return None;
    }

    let rest = &text[opening..];
    let mut pos = 0;
    while pos < rest.len() {
        if rest.as_bytes()[pos] == b'`' {
            let closing = rest[pos..].bytes().take_while(|&b| b == b'`').count();
            if closing == opening {
                let content = &rest[..pos];
                return Some((opening + pos + closing, content));
            }
            pos += closing;
        } else {
            pos += rest[pos..].chars().next()?.len_utf8();
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_code_span() {
        assert_eq!(try_parse_code_span("`code`"), Some((6, "code")));
    }

    #[test]
    fn test_parse_code_span_with_backticks() {
        assert_eq!(
            try_parse_code_span("`` `backtick` ``"),
            Some((16, " `backtick` "))
        );
    }

    #[test]
    fn test_parse_code_span_no_close() {
        assert_eq!(try_parse_code_span("`no close"), None);
    }

    #[test]
    fn test_parse_code_span_mismatched_close() {
        assert_eq!(try_parse_code_span("`single``"), None);
    }

    #[test]
    fn test_code_span_with_trailing_text() {
        assert_eq!(try_parse_code_span("`code` and more"), Some((6, "code")));
    }

    #[test]
    fn test_markup_suppressed_inside() {
        assert_eq!(try_parse_code_span("`*not em*`"), Some((10, "*not em*")));
    }
}
