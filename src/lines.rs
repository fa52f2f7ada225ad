//! Line classification.
//!
//! The first compilation stage scans raw input into logical lines: tabs are
//! expanded to the next multiple-of-4 column stop, the leading indent is
//! measured in columns, and each line gets a block-level kind hint. The hint
//! is a parsing aid only; the block parser reclassifies based on context
//! (a 4-column line inside a list item is item content, not code).
//!
//! There is no rejection path here: every line is representable, in the worst
//! case as paragraph text.

/// Tab stop used for indent expansion.
pub const TAB_STOP: usize = 4;

/// Indent threshold at which a line becomes indented code.
pub const CODE_INDENT: usize = 4;

/// A block-level affiliation hint for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// Indented at least [`CODE_INDENT`] columns.
    IndentedCode,
    /// Starts with a `#` run followed by a space or end of line.
    AtxHeading,
    /// Consists solely of `=` or `-` characters (a possible setext underline).
    SetextUnderline(char),
    /// Starts with a bullet or ordered list marker.
    ListMarker,
    /// Starts with a `>` quote marker.
    QuoteMarker,
    /// Starts with `[^label]:` at column 0.
    FootnoteDefinition,
    /// Anything else: paragraph text until proven otherwise.
    Text,
}

/// One logical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Line content with tabs expanded, without the trailing newline.
    pub text: String,
    /// Leading indent width in expanded columns.
    pub indent: usize,
    /// Non-authoritative kind hint.
    pub kind: LineKind,
}

impl ClassifiedLine {
    /// Build a line from already-expanded text, recomputing indent and kind.
    ///
    /// Used by container parsers after stripping markers or indent from a
    /// line, so the stripped remainder can be re-fed to the block parser.
    pub fn reclassify(text: String) -> Self {
        let indent = leading_indent(&text);
        let kind = classify_line(&text, indent);
        ClassifiedLine { text, indent, kind }
    }

    pub fn is_blank(&self) -> bool {
        self.kind == LineKind::Blank
    }

    /// The line content with its leading indent removed.
    pub fn rest(&self) -> &str {
        &self.text[self.indent..]
    }

    /// A copy of the line with up to `cols` leading columns stripped.
    ///
    /// After tab expansion indentation is all spaces, so columns map
    /// one-to-one to bytes.
    pub fn strip_columns(&self, cols: usize) -> ClassifiedLine {
        let strip = cols.min(self.indent);
        ClassifiedLine::reclassify(self.text[strip..].to_string())
    }
}

/// Scan raw input into classified lines.
pub fn classify(source: &str) -> Vec<ClassifiedLine> {
    let normalized = source.replace("\r\n", "\n");
    normalized
        .split('\n')
        .map(|raw| ClassifiedLine::reclassify(expand_tabs(raw)))
        .collect()
}

/// Expand tabs to spaces at multiple-of-4 column stops.
fn expand_tabs(raw: &str) -> String {
    if !raw.contains('\t') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + TAB_STOP);
    let mut col = 0usize;
    for ch in raw.chars() {
        if ch == '\t' {
            let pad = TAB_STOP - (col % TAB_STOP);
            for _ in 0..pad {
                out.push(' ');
            }
            col += pad;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    out
}

/// Count leading space columns. Tabs are already expanded.
fn leading_indent(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b' ').count()
}

fn classify_line(text: &str, indent: usize) -> LineKind {
    let rest = &text[indent..];

    if rest.is_empty() {
        return LineKind::Blank;
    }
    if indent >= CODE_INDENT {
        return LineKind::IndentedCode;
    }
    if rest.starts_with('>') {
        return LineKind::QuoteMarker;
    }
    if indent == 0 && rest.starts_with("[^") {
        return LineKind::FootnoteDefinition;
    }

    let hashes = rest.bytes().take_while(|&b| b == b'#').count();
    if hashes >= 1 {
        let after = &rest[hashes..];
        if after.is_empty() || after.starts_with(' ') {
            return LineKind::AtxHeading;
        }
    }

    if let Some(ch) = setext_underline_char(rest) {
        return LineKind::SetextUnderline(ch);
    }

    if looks_like_list_marker(rest) {
        return LineKind::ListMarker;
    }

    LineKind::Text
}

/// If the line consists solely of `=` or `-` characters, return that
/// character. Trailing whitespace is allowed.
fn setext_underline_char(rest: &str) -> Option<char> {
    let trimmed = rest.trim_end();
    let first = trimmed.chars().next()?;
    if (first == '=' || first == '-') && trimmed.chars().all(|c| c == first) {
        Some(first)
    } else {
        None
    }
}

fn looks_like_list_marker(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some('-' | '*' | '+') => matches!(chars.next(), Some(' ') | None),
        Some(c) if c.is_ascii_digit() => {
            let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
            let after = &rest[digits..];
            after.starts_with('.') && matches!(after[1..].chars().next(), Some(' ') | None)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> LineKind {
        ClassifiedLine::reclassify(expand_tabs(line)).kind
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(kind_of(""), LineKind::Blank);
        assert_eq!(kind_of("   "), LineKind::Blank);
        assert_eq!(kind_of("\t"), LineKind::Blank);
    }

    #[test]
    fn test_tab_expansion_to_column_stops() {
        assert_eq!(expand_tabs("\tcode"), "    code");
        assert_eq!(expand_tabs("a\tb"), "a   b");
        assert_eq!(expand_tabs("ab\tc"), "ab  c");
        assert_eq!(expand_tabs("abcd\te"), "abcd    e");
    }

    #[test]
    fn test_indent_measured_in_columns() {
        let line = ClassifiedLine::reclassify(expand_tabs("\tcode"));
        assert_eq!(line.indent, 4);
        assert_eq!(line.kind, LineKind::IndentedCode);
    }

    #[test]
    fn test_heading_hints() {
        assert_eq!(kind_of("# Title"), LineKind::AtxHeading);
        assert_eq!(kind_of("###### deep"), LineKind::AtxHeading);
        assert_eq!(kind_of("####### deeper still"), LineKind::AtxHeading);
        assert_eq!(kind_of("#nospace"), LineKind::Text);
    }

    #[test]
    fn test_setext_underline_hints() {
        assert_eq!(kind_of("====="), LineKind::SetextUnderline('='));
        // A bare dash line is hinted as a list marker; the parser decides
        // between setext, rule, and list from context.
        assert_eq!(kind_of("--"), LineKind::SetextUnderline('-'));
    }

    #[test]
    fn test_list_marker_hints() {
        assert_eq!(kind_of("- item"), LineKind::ListMarker);
        assert_eq!(kind_of("* item"), LineKind::ListMarker);
        assert_eq!(kind_of("+ item"), LineKind::ListMarker);
        assert_eq!(kind_of("12. item"), LineKind::ListMarker);
        assert_eq!(kind_of("12.no"), LineKind::Text);
        assert_eq!(kind_of("-dash"), LineKind::Text);
    }

    #[test]
    fn test_quote_and_footnote_hints() {
        assert_eq!(kind_of("> quoted"), LineKind::QuoteMarker);
        assert_eq!(kind_of("[^note]: body"), LineKind::FootnoteDefinition);
        assert_eq!(kind_of("  [^note]: body"), LineKind::Text);
    }

    #[test]
    fn test_strip_columns_reclassifies() {
        let line = ClassifiedLine::reclassify("        code".to_string());
        let stripped = line.strip_columns(4);
        assert_eq!(stripped.text, "    code");
        assert_eq!(stripped.kind, LineKind::IndentedCode);
        let stripped = stripped.strip_columns(4);
        assert_eq!(stripped.kind, LineKind::Text);
    }

    #[test]
    fn test_crlf_normalized() {
        let lines = classify("a\r\nb\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[1].text, "b");
        assert!(lines[2].is_blank());
    }
}
