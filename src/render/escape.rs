//! HTML escaping.
//!
//! `&` is escaped entity-aware: an ampersand that already starts a valid
//! entity form (`&name;`, `&#123;`, `&#x1f;`) passes through unchanged, so
//! escaping is idempotent and authors can write entities directly.

/// Escape text content: `<`, `>`, and bare `&`.
pub(crate) fn escape_html(out: &mut String, text: &str) {
    escape(out, text, false);
}

/// Escape attribute values: text rules plus `"`.
pub(crate) fn escape_attribute(out: &mut String, text: &str) {
    escape(out, text, true);
}

fn escape(out: &mut String, text: &str, in_attribute: bool) {
    for (pos, ch) in text.char_indices() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '&' if !starts_entity(&text[pos..]) => out.push_str("&amp;"),
            _ => out.push(ch),
        }
    }
}

/// Whether the text starts with a complete entity: `&name;`, `&#digits;`,
/// or `&#xhex;`.
fn starts_entity(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('&') else {
        return false;
    };
    let Some(end) = rest.find(';') else {
        return false;
    };
    let body = &rest[..end];

    if let Some(numeric) = body.strip_prefix('#') {
        if let Some(hex) = numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
            return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
        }
        return !numeric.is_empty() && numeric.bytes().all(|b| b.is_ascii_digit());
    }

    !body.is_empty() && body.bytes().all(|b| b.is_ascii_alphanumeric())
}
