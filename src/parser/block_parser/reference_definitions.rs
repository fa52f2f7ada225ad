//! Reference definition parsing for Markdown reference links and images.
//!
//! Reference definitions have the form:
//! ```markdown
//! [label]: url "optional title"
//! [label]: url 'optional title'
//! [label]: url (optional title)
//! [label]: <url> "title"
//! ```
//!
//! They are collected into a registry during the block phase and consumed by
//! the inline scanner when resolving `[text][label]` links.

use std::collections::HashMap;

use super::utils::{find_label_end, normalize_label};

/// A reference definition that maps a label to a URL and optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceDefinition {
    pub label: String,
    pub url: String,
    pub title: Option<String>,
}

/// Registry of reference definitions, keyed by normalized label.
/// First definition wins, matching the footnote table policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceRegistry {
    definitions: HashMap<String, ReferenceDefinition>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: String, url: String, title: Option<String>) {
        let key = normalize_label(&label);
        self.definitions
            .entry(key)
            .or_insert(ReferenceDefinition { label, url, title });
    }

    /// Look up a definition by label (case-insensitive).
    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(&normalize_label(label))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.definitions.contains_key(&normalize_label(label))
    }
}

/// Try to parse a full line as a reference definition.
/// Returns (label, url, title) if the whole line matches.
pub(crate) fn try_parse_reference_definition(
    rest: &str,
) -> Option<(String, String, Option<String>)> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    // `[^...]:` is a footnote definition, not a reference.
    if bytes.get(1) == Some(&b'^') {
        return None;
    }

    let close = find_label_end(rest, 0)?;
    let label = &rest[1..close];
    if label.is_empty() {
        return None;
    }

    let mut pos = close + 1;
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;
    while matches!(bytes.get(pos), Some(b' ')) {
        pos += 1;
    }

    let url = if bytes.get(pos) == Some(&b'<') {
        pos += 1;
        let start = pos;
        while pos < bytes.len() && bytes[pos] != b'>' {
            pos += 1;
        }
        if pos >= bytes.len() {
            return None;
        }
        let url = &rest[start..pos];
        pos += 1; // skip >
        url
    } else {
        let start = pos;
        while pos < bytes.len() && bytes[pos] != b' ' {
            pos += 1;
        }
        if start == pos {
            return None;
        }
        &rest[start..pos]
    };

    while matches!(bytes.get(pos), Some(b' ')) {
        pos += 1;
    }

    let title = if pos < bytes.len() {
        let (title, after) = parse_title(&rest[pos..])?;
        pos += after;
        while matches!(bytes.get(pos), Some(b' ')) {
            pos += 1;
        }
        // Trailing junk after the title means this is ordinary text.
        if pos < bytes.len() {
            return None;
        }
        Some(title)
    } else {
        None
    };

    Some((label.to_string(), url.to_string(), title))
}

/// Parse a quoted title (`"..."`, `'...'`, or `(...)`) at the start of the
/// text. Returns the title and the bytes consumed.
fn parse_title(text: &str) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let open = *bytes.first()?;
    let close = match open {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };
    let mut pos = 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            c if c == close => {
                return Some((text[1..pos].to_string(), pos + 1));
            }
            _ => pos += 1,
        }
    }
    None
}
