//! Horizontal rule recognition.

/// Try to parse a horizontal rule from line content.
/// Returns the rule character if the line qualifies.
///
/// A horizontal rule is 3 or more `*`, `-`, or `_` characters, optionally
/// separated by spaces, with nothing else on the line.
pub(crate) fn try_parse_horizontal_rule(rest: &str) -> Option<char> {
    let trimmed = rest.trim();
    let rule_char = trimmed.chars().next()?;
    if !matches!(rule_char, '*' | '-' | '_') {
        return None;
    }

    let mut count = 0;
    for ch in trimmed.chars() {
        match ch {
            c if c == rule_char => count += 1,
            ' ' => continue,
            _ => return None,
        }
    }

    if count >= 3 { Some(rule_char) } else { None }
}
