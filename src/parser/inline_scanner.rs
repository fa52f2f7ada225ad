//! The inline scanner.
//!
//! Turns the flat text stored in paragraphs and headings into inline nodes.
//! Scanning runs in two stages: a collector walks the text left to right and
//! produces a flat token list (finished nodes, literal text, and emphasis
//! delimiter runs), then the emphasis resolver pairs the delimiter runs into
//! nested `Emphasis`/`Strong` nodes.
//!
//! Precedence falls out of the collector's single pass: code spans, links,
//! autolinks, raw HTML, and footnote references consume their text before
//! emphasis delimiters are even recorded, so `` *a `b*` `` keeps the
//! asterisk inside the code span literal.

use crate::ast::Inline;
use crate::config::Options;
use crate::parser::block_parser::utils::find_label_end;
use crate::parser::block_parser::{FootnoteTable, ReferenceRegistry};

mod code_spans;
mod emphasis;
mod escapes;
mod links;

use code_spans::try_parse_code_span;
use emphasis::analyze_delimiter_run;
use escapes::{Escape, try_parse_escape};
use links::{try_parse_autolink, try_parse_inline_html, try_parse_link};

/// Intermediate token produced by the collector stage.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InlineToken {
    /// A finished inline node. Emphasis resolution passes these through.
    Node(Inline),
    /// Literal text.
    Text(String),
    /// A run of `*` or `_` that may participate in emphasis.
    Delimiter {
        ch: char,
        count: usize,
        can_open: bool,
        can_close: bool,
    },
}

/// Scans inline text against the document's side tables.
pub struct InlineScanner<'a> {
    options: &'a Options,
    footnotes: &'a FootnoteTable,
    references: &'a ReferenceRegistry,
}

impl<'a> InlineScanner<'a> {
    pub fn new(
        options: &'a Options,
        footnotes: &'a FootnoteTable,
        references: &'a ReferenceRegistry,
    ) -> Self {
        Self {
            options,
            footnotes,
            references,
        }
    }

    /// Scan a block's text into inline nodes.
    pub fn scan(&self, text: &str) -> Vec<Inline> {
        self.scan_with(text, true)
    }

    /// Links cannot nest, so link label content is scanned with links off.
    fn scan_with(&self, text: &str, allow_links: bool) -> Vec<Inline> {
        log::trace!("Scanning inline text ({} bytes)", text.len());
        let tokens = self.collect(text, allow_links);
        emphasis::resolve(tokens)
    }

    /// Collector stage: one left-to-right pass over the text.
    fn collect(&self, text: &str, allow_links: bool) -> Vec<InlineToken> {
        let mut tokens = Vec::new();
        let mut buf = String::new();
        let bytes = text.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let rest = &text[pos..];
            match bytes[pos] {
                b'\\' => match try_parse_escape(rest) {
                    Some(Escape::Literal(ch, len)) => {
                        buf.push(ch);
                        pos += len;
                    }
                    Some(Escape::HardBreak(len)) => {
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Node(Inline::LineBreak));
                        pos += len;
                    }
                    None => {
                        buf.push('\\');
                        pos += 1;
                    }
                },
                b'`' => match try_parse_code_span(rest) {
                    Some((len, content)) => {
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Node(Inline::CodeSpan(content.to_string())));
                        pos += len;
                    }
                    None => {
                        let run = rest.bytes().take_while(|&b| b == b'`').count();
                        buf.push_str(&rest[..run]);
                        pos += run;
                    }
                },
                b'\n' => {
                    let trailing = buf.bytes().rev().take_while(|&b| b == b' ').count();
                    if trailing >= 2 {
                        buf.truncate(buf.len() - trailing);
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Node(Inline::LineBreak));
                    } else {
                        buf.push('\n');
                    }
                    pos += 1;
                }
                b'!' if bytes.get(pos + 1) == Some(&b'[') => {
                    match try_parse_link(&rest[1..], self.references) {
                        Some(m) => {
                            flush(&mut tokens, &mut buf);
                            let alt = plain_text(&self.scan_with(m.text, false));
                            tokens.push(InlineToken::Node(Inline::Image {
                                target: m.target,
                                title: m.title,
                                alt,
                            }));
                            pos += 1 + m.len;
                        }
                        None => {
                            buf.push('!');
                            pos += 1;
                        }
                    }
                }
                b'[' => {
                    if let Some(consumed) = self.collect_bracket(rest, allow_links, &mut tokens, &mut buf) {
                        pos += consumed;
                    } else {
                        buf.push('[');
                        pos += 1;
                    }
                }
                b'<' => {
                    if let Some((len, href, label)) = try_parse_autolink(rest) {
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Node(Inline::Link {
                            target: href,
                            title: None,
                            children: vec![Inline::text(&label)],
                        }));
                        pos += len;
                    } else if let Some((len, html)) = try_parse_inline_html(rest) {
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Node(Inline::RawHtml(html.to_string())));
                        pos += len;
                    } else {
                        buf.push('<');
                        pos += 1;
                    }
                }
                b'*' | b'_' => {
                    let ch = bytes[pos] as char;
                    let count = rest.bytes().take_while(|&b| b == bytes[pos]).count();
                    let (can_open, can_close) = analyze_delimiter_run(text, pos, ch, count);
                    if can_open || can_close {
                        flush(&mut tokens, &mut buf);
                        tokens.push(InlineToken::Delimiter {
                            ch,
                            count,
                            can_open,
                            can_close,
                        });
                    } else {
                        buf.push_str(&rest[..count]);
                    }
                    pos += count;
                }
                _ => {
                    let ch = match rest.chars().next() {
                        Some(ch) => ch,
                        None => break,
                    };
                    buf.push(ch);
                    pos += ch.len_utf8();
                }
            }
        }

        flush(&mut tokens, &mut buf);
        tokens
    }

    /// Handle a `[`: footnote reference first, then a link. Returns the
    /// bytes consumed, or None to emit the bracket literally.
    fn collect_bracket(
        &self,
        rest: &str,
        allow_links: bool,
        tokens: &mut Vec<InlineToken>,
        buf: &mut String,
    ) -> Option<usize> {
        if self.options.footnotes && rest.starts_with("[^") {
            let close = find_label_end(rest, 0)?;
            let label = &rest[2..close];
            if label.is_empty() {
                return None;
            }
            if self.footnotes.contains(label) {
                flush(tokens, buf);
                tokens.push(InlineToken::Node(Inline::FootnoteReference(
                    label.to_string(),
                )));
            } else {
                // No matching definition: the reference stays literal.
                log::debug!("Undefined footnote reference [^{label}]");
                buf.push_str(&rest[..close + 1]);
            }
            return Some(close + 1);
        }

        if !allow_links {
            return None;
        }
        let m = try_parse_link(rest, self.references)?;
        flush(tokens, buf);
        let children = self.scan_with(m.text, false);
        tokens.push(InlineToken::Node(Inline::Link {
            target: m.target,
            title: m.title,
            children,
        }));
        Some(m.len)
    }
}

fn flush(tokens: &mut Vec<InlineToken>, buf: &mut String) {
    if !buf.is_empty() {
        tokens.push(InlineToken::Text(std::mem::take(buf)));
    }
}

/// Flatten inline nodes to their text content, for image alt attributes.
fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) | Inline::CodeSpan(text) => out.push_str(text),
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Link { children, .. } => out.push_str(&plain_text(children)),
            Inline::Image { alt, .. } => out.push_str(alt),
            Inline::FootnoteReference(_) | Inline::RawHtml(_) => {}
            Inline::LineBreak => out.push(' '),
        }
    }
    out
}
