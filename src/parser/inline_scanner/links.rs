//! Link, image, and autolink parsing.
//!
//! Recognized forms:
//! - inline: `[text](url "title")`
//! - reference: `[text][label]`, `[text][]`, `[label]`
//! - image variants of all of the above with a leading `!`
//! - autolinks: `<scheme://host>` and `<user@host>`
//!
//! Reference forms resolve against the registry collected during the block
//! phase; unresolved references degrade to literal text (the caller gets
//! `None` and emits the bracket as-is).

use crate::parser::block_parser::ReferenceRegistry;
use crate::parser::block_parser::utils::find_label_end;

/// A recognized link or image. `text` is the raw span between the brackets;
/// the scanner decides whether to recurse into it (links) or flatten it
/// (image alt text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkMatch<'a> {
    pub len: usize,
    pub text: &'a str,
    pub target: String,
    pub title: Option<String>,
}

/// Try to parse a link starting at `[`.
pub(crate) fn try_parse_link<'a>(
    text: &'a str,
    references: &ReferenceRegistry,
) -> Option<LinkMatch<'a>> {
    let close = find_label_end(text, 0)?;
    let inner = &text[1..close];
    let after = &text[close + 1..];

    if after.starts_with('(') {
        let (target, title, dest_len) = parse_destination(after)?;
        return Some(LinkMatch {
            len: close + 1 + dest_len,
            text: inner,
            target,
            title,
        });
    }

    if after.starts_with('[') {
        let label_close = find_label_end(after, 0)?;
        let label = &after[1..label_close];
        // `[text][]` collapses to the text as label.
        let label = if label.is_empty() { inner } else { label };
        let def = references.get(label)?;
        return Some(LinkMatch {
            len: close + 1 + label_close + 1,
            text: inner,
            target: def.url.clone(),
            title: def.title.clone(),
        });
    }

    // Shortcut reference: `[label]` alone.
    let def = references.get(inner)?;
    Some(LinkMatch {
        len: close + 1,
        text: inner,
        target: def.url.clone(),
        title: def.title.clone(),
    })
}

/// Parse `(url "title")` at the start of the text.
/// Returns (target, title, bytes consumed including both parens).
fn parse_destination(text: &str) -> Option<(String, Option<String>, usize)> {
    let bytes = text.as_bytes();
    debug_assert_eq!(bytes.first(), Some(&b'('));
    let mut pos = 1;
    while matches!(bytes.get(pos), Some(b' ')) {
        pos += 1;
    }

    let target = if bytes.get(pos) == Some(&b'<') {
        pos += 1;
        let start = pos;
        while pos < bytes.len() && !matches!(bytes[pos], b'>' | b'\n') {
            pos += 1;
        }
        if bytes.get(pos) != Some(&b'>') {
            return None;
        }
        let url = &text[start..pos];
        pos += 1;
        url
    } else {
        let start = pos;
        let mut depth = 0usize;
        while pos < bytes.len() {
            match bytes[pos] {
                b' ' | b'\n' => break,
                b'(' => {
                    depth += 1;
                    pos += 1;
                }
                b')' if depth == 0 => break,
                b')' => {
                    depth -= 1;
                    pos += 1;
                }
                b'\\' => pos += 2,
                _ => pos += 1,
            }
        }
        &text[start..pos.min(text.len())]
    };

    while matches!(bytes.get(pos), Some(b' ')) {
        pos += 1;
    }

    let title = if matches!(bytes.get(pos), Some(b'"' | b'\'')) {
        let quote = bytes[pos];
        pos += 1;
        let start = pos;
        while pos < bytes.len() && bytes[pos] != quote {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }
        let title = text[start..pos].to_string();
        pos += 1;
        while matches!(bytes.get(pos), Some(b' ')) {
            pos += 1;
        }
        Some(title)
    } else {
        None
    };

    if bytes.get(pos) != Some(&b')') {
        return None;
    }
    Some((target.to_string(), title, pos + 1))
}

/// Try to parse an angle autolink starting at `<`.
/// Returns (total_len, href, display text).
pub(crate) fn try_parse_autolink(text: &str) -> Option<(usize, String, String)> {
    debug_assert!(text.starts_with('<'));
    let end = text.find('>')?;
    let inner = &text[1..end];
    if inner.is_empty() || inner.contains([' ', '<', '\n']) {
        return None;
    }

    let has_scheme = inner
        .split_once(':')
        .is_some_and(|(scheme, rest)| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                && scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && !rest.is_empty()
        });
    if has_scheme {
        return Some((end + 1, inner.to_string(), inner.to_string()));
    }

    // Bare email address.
    if let Some((user, host)) = inner.split_once('@')
        && !user.is_empty()
        && host.contains('.')
        && !host.contains('@')
    {
        return Some((end + 1, format!("mailto:{inner}"), inner.to_string()));
    }

    None
}

/// Try to parse a raw inline HTML span starting at `<`: an open/close tag
/// or a comment, confined to one line.
pub(crate) fn try_parse_inline_html(text: &str) -> Option<(usize, &str)> {
    debug_assert!(text.starts_with('<'));
    if text.starts_with("<!--") {
        let end = text.find("-->")?;
        return Some((end + 3, &text[..end + 3]));
    }

    let mut tag = &text[1..];
    if let Some(stripped) = tag.strip_prefix('/') {
        tag = stripped;
    }
    if !tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let end = text.find('>')?;
    if text[..end].contains('\n') {
        return None;
    }
    Some((end + 1, &text[..end + 1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_registry() -> ReferenceRegistry {
        ReferenceRegistry::new()
    }

    #[test]
    fn test_inline_link() {
        let m = try_parse_link("[text](/url)", &empty_registry()).unwrap();
        assert_eq!(m.len, 12);
        assert_eq!(m.text, "text");
        assert_eq!(m.target, "/url");
        assert_eq!(m.title, None);
    }

    #[test]
    fn test_inline_link_with_title() {
        let m = try_parse_link(r#"[t](/u "hi")"#, &empty_registry()).unwrap();
        assert_eq!(m.target, "/u");
        assert_eq!(m.title.as_deref(), Some("hi"));
        assert_eq!(m.len, 12);
    }

    #[test]
    fn test_angle_bracketed_destination() {
        let m = try_parse_link("[t](<my url>)", &empty_registry()).unwrap();
        assert_eq!(m.target, "my url");
    }

    #[test]
    fn test_destination_with_balanced_parens() {
        let m = try_parse_link("[t](/url(x))", &empty_registry()).unwrap();
        assert_eq!(m.target, "/url(x)");
    }

    #[test]
    fn test_unclosed_is_not_a_link() {
        assert_eq!(try_parse_link("[text](/url", &empty_registry()), None);
        assert_eq!(try_parse_link("[text", &empty_registry()), None);
    }

    #[test]
    fn test_reference_link() {
        let mut registry = ReferenceRegistry::new();
        registry.add("ref".to_string(), "/url".to_string(), None);
        let m = try_parse_link("[text][ref]", &registry).unwrap();
        assert_eq!(m.len, 11);
        assert_eq!(m.text, "text");
        assert_eq!(m.target, "/url");
    }

    #[test]
    fn test_collapsed_reference_link() {
        let mut registry = ReferenceRegistry::new();
        registry.add("text".to_string(), "/url".to_string(), None);
        let m = try_parse_link("[text][]", &registry).unwrap();
        assert_eq!(m.len, 8);
        assert_eq!(m.target, "/url");
    }

    #[test]
    fn test_shortcut_reference_link() {
        let mut registry = ReferenceRegistry::new();
        registry.add("text".to_string(), "/url".to_string(), None);
        let m = try_parse_link("[text] rest", &registry).unwrap();
        assert_eq!(m.len, 6);
    }

    #[test]
    fn test_undefined_reference_degrades() {
        assert_eq!(try_parse_link("[nope][missing]", &empty_registry()), None);
        assert_eq!(try_parse_link("[missing]", &empty_registry()), None);
    }

    #[test]
    fn test_scheme_autolink() {
        let (len, href, label) = try_parse_autolink("<http://example.com/>").unwrap();
        assert_eq!(len, 21);
        assert_eq!(href, "http://example.com/");
        assert_eq!(label, "http://example.com/");
    }

    #[test]
    fn test_email_autolink() {
        let (_, href, label) = try_parse_autolink("<me@example.com>").unwrap();
        assert_eq!(href, "mailto:me@example.com");
        assert_eq!(label, "me@example.com");
    }

    #[test]
    fn test_not_an_autolink() {
        assert_eq!(try_parse_autolink("<not a link>"), None);
        assert_eq!(try_parse_autolink("<>"), None);
    }

    #[test]
    fn test_inline_html_tag() {
        assert_eq!(try_parse_inline_html("<em>x"), Some((4, "<em>")));
        assert_eq!(try_parse_inline_html("</em>"), Some((5, "</em>")));
        assert_eq!(
            try_parse_inline_html("<a href=\"x\">y"),
            Some((12, "<a href=\"x\">"))
        );
    }

    #[test]
    fn test_inline_html_comment() {
        assert_eq!(try_parse_inline_html("<!-- c -->x"), Some((10, "<!-- c -->")));
    }

    #[test]
    fn test_bare_angle_is_not_html() {
        assert_eq!(try_parse_inline_html("<3"), None);
        assert_eq!(try_parse_inline_html("< div>"), None);
    }
}
