//! ATX and setext heading recognition.

/// Try to parse an ATX heading from line content (indent already stripped).
/// Returns (level, text) if the line is a heading.
///
/// One or more `#` characters followed by a space (or end of line) start a
/// heading. The level clamps to 6; surplus markers stay in the text.
/// Trailing `#` runs are stripped, classic Markdown style.
pub(crate) fn try_parse_atx_heading(rest: &str) -> Option<(u8, &str)> {
    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 {
        return None;
    }
    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with(' ') {
        return None;
    }
    let level = hashes.min(6);
    let text = rest[level..]
        .trim_start()
        .trim_end()
        .trim_end_matches('#')
        .trim_end();
    Some((level as u8, text))
}

/// Check whether a line is a setext underline, returning the heading level
/// it would confer (`=` gives 1, `-` gives 2).
///
/// Only meaningful directly below a paragraph line; the caller supplies that
/// one line of lookahead.
pub(crate) fn setext_level(rest: &str) -> Option<u8> {
    let trimmed = rest.trim_end();
    let first = trimmed.chars().next()?;
    let level = match first {
        '=' => 1,
        '-' => 2,
        _ => return None,
    };
    if trimmed.chars().all(|c| c == first) {
        Some(level)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_heading() {
        assert_eq!(try_parse_atx_heading("# Heading"), Some((1, "Heading")));
    }

    #[test]
    fn test_level_clamping_at_six() {
        assert_eq!(try_parse_atx_heading("###### six"), Some((6, "six")));
        assert_eq!(try_parse_atx_heading("####### seven"), Some((6, "# seven")));
        assert_eq!(try_parse_atx_heading("######## eight"), Some((6, "## eight")));
    }

    #[test]
    fn test_no_space_after_hash() {
        assert_eq!(try_parse_atx_heading("#NoSpace"), None);
    }

    #[test]
    fn test_trailing_hashes_stripped() {
        assert_eq!(try_parse_atx_heading("## Title ##"), Some((2, "Title")));
    }

    #[test]
    fn test_empty_heading() {
        assert_eq!(try_parse_atx_heading("#"), Some((1, "")));
        assert_eq!(try_parse_atx_heading("# "), Some((1, "")));
    }

    #[test]
    fn test_setext_levels() {
        assert_eq!(setext_level("====="), Some(1));
        assert_eq!(setext_level("-"), Some(2));
        assert_eq!(setext_level("--- "), Some(2));
        assert_eq!(setext_level("=-="), None);
        assert_eq!(setext_level("text"), None);
        assert_eq!(setext_level(""), None);
    }
}
