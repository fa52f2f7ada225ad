//! Small helpers shared by the block parser modules.

/// Normalize a footnote or reference label for case-insensitive matching:
/// trim, collapse internal whitespace, lowercase.
pub(crate) fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_was_space = false;
    for ch in label.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            last_was_space = false;
        }
    }
    out
}

/// Find the closing `]` of a label opened at `open` (pointing at `[`),
/// honoring backslash escapes. Labels cannot contain unescaped brackets.
pub(crate) fn find_label_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'['));
    let mut pos = open + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b']' => return Some(pos),
            b'[' => return None,
            _ => pos += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label_case() {
        assert_eq!(normalize_label("FOO"), "foo");
        assert_eq!(normalize_label("Foo Bar"), "foo bar");
    }

    #[test]
    fn test_normalize_label_whitespace() {
        assert_eq!(normalize_label("foo  bar"), "foo bar");
        assert_eq!(normalize_label("  foo  "), "foo");
        assert_eq!(normalize_label("foo\tbar"), "foo bar");
    }

    #[test]
    fn test_find_label_end() {
        assert_eq!(find_label_end("[abc] rest", 0), Some(4));
        assert_eq!(find_label_end("[a\\]b]", 0), Some(5));
        assert_eq!(find_label_end("[never closed", 0), None);
        assert_eq!(find_label_end("[nested [x]]", 0), None);
    }
}
