//! The HTML renderer.
//!
//! Walks the block tree and emits HTML, invoking the inline scanner on each
//! leaf block's text as it goes. All render state (inline trees, footnote
//! numbering) lives in the renderer itself, never on the document, so
//! rendering the same document twice produces identical output.
//!
//! Footnote reference indices are 1-based and assigned in order of first
//! reference. The footnote section at the end of the body lists entries in
//! that order, each followed by a back-reference link to its first use.
//! Unreferenced definitions never reach the output.

use std::collections::HashMap;

use crate::ast::{Block, Inline, ListKind};
use crate::config::Options;
use crate::parser::block_parser::utils::normalize_label;
use crate::parser::{FootnoteTable, InlineScanner, ReferenceRegistry};

mod escape;

use escape::{escape_attribute, escape_html};

/// Footnote numbering for one render pass.
#[derive(Default)]
struct FootnoteRefs {
    indices: HashMap<String, usize>,
    /// Normalized labels in first-reference order.
    order: Vec<String>,
}

impl FootnoteRefs {
    /// Index for a label, assigning the next one on first use.
    /// The bool is true for a first use.
    fn index(&mut self, label: &str) -> (usize, bool) {
        let key = normalize_label(label);
        if let Some(&index) = self.indices.get(&key) {
            return (index, false);
        }
        let index = self.order.len() + 1;
        self.indices.insert(key.clone(), index);
        self.order.push(key);
        (index, true)
    }
}

pub(crate) struct Renderer<'a> {
    options: &'a Options,
    footnotes: &'a FootnoteTable,
    references: &'a ReferenceRegistry,
    refs: FootnoteRefs,
}

impl<'a> Renderer<'a> {
    pub fn new(
        options: &'a Options,
        footnotes: &'a FootnoteTable,
        references: &'a ReferenceRegistry,
    ) -> Self {
        Self {
            options,
            footnotes,
            references,
            refs: FootnoteRefs::default(),
        }
    }

    /// Render a block sequence, appending the footnote section if anything
    /// was referenced.
    pub fn render(mut self, blocks: &[Block]) -> String {
        let mut out = String::new();
        self.render_blocks(&mut out, blocks, false);
        self.render_footnote_section(&mut out);
        out
    }

    /// `tight` suppresses `<p>` wrapping, for tight list items.
    fn render_blocks(&mut self, out: &mut String, blocks: &[Block], tight: bool) {
        for block in blocks {
            self.render_block(out, block, tight);
        }
    }

    fn render_block(&mut self, out: &mut String, block: &Block, tight: bool) {
        match block {
            Block::Paragraph { text } => {
                if tight {
                    self.render_inline_text(out, text);
                    out.push('\n');
                } else {
                    out.push_str("<p>");
                    self.render_inline_text(out, text);
                    out.push_str("</p>\n");
                }
            }
            Block::Heading { level, text } => {
                out.push_str(&format!("<h{level}>"));
                self.render_inline_text(out, text);
                out.push_str(&format!("</h{level}>\n"));
            }
            Block::List { kind, tight, items } => {
                let tag = match kind {
                    ListKind::Bullet(_) => "ul",
                    ListKind::Ordered => "ol",
                };
                out.push_str(&format!("<{tag}>\n"));
                for item in items {
                    if let Block::ListItem { blocks } = item {
                        out.push_str("<li>");
                        self.render_blocks(out, blocks, *tight);
                        // Tight item content ends with the newline we added;
                        // fold it into the closing tag.
                        if out.ends_with('\n') {
                            out.pop();
                        }
                        out.push_str("</li>\n");
                    }
                }
                out.push_str(&format!("</{tag}>\n"));
            }
            Block::ListItem { blocks } => {
                // Items outside a list should not occur; render content.
                self.render_blocks(out, blocks, false);
            }
            Block::BlockQuote { blocks } => {
                out.push_str("<blockquote>\n");
                self.render_blocks(out, blocks, false);
                out.push_str("</blockquote>\n");
            }
            Block::CodeBlock { text, language } => {
                match language {
                    Some(language) => {
                        out.push_str("<pre><code class=\"language-");
                        escape_attribute(out, language);
                        out.push_str("\">");
                    }
                    None => out.push_str("<pre><code>"),
                }
                // Code text always carries its trailing newline.
                escape_html(out, text);
                out.push_str("</code></pre>\n");
            }
            Block::HorizontalRule => out.push_str("<hr/>\n"),
            Block::RawHtml { text } => {
                out.push_str(text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }

    fn render_inline_text(&mut self, out: &mut String, text: &str) {
        let inlines =
            InlineScanner::new(self.options, self.footnotes, self.references).scan(text);
        self.render_inlines(out, &inlines);
    }

    fn render_inlines(&mut self, out: &mut String, inlines: &[Inline]) {
        for inline in inlines {
            self.render_inline(out, inline);
        }
    }

    fn render_inline(&mut self, out: &mut String, inline: &Inline) {
        match inline {
            Inline::Text(text) => escape_html(out, text),
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                self.render_inlines(out, children);
                out.push_str("</em>");
            }
            Inline::Strong(children) => {
                out.push_str("<strong>");
                self.render_inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::CodeSpan(text) => {
                out.push_str("<code>");
                escape_html(out, text);
                out.push_str("</code>");
            }
            Inline::Link {
                target,
                title,
                children,
            } => {
                out.push_str("<a href=\"");
                escape_attribute(out, target);
                out.push('"');
                if let Some(title) = title {
                    out.push_str(" title=\"");
                    escape_attribute(out, title);
                    out.push('"');
                }
                out.push('>');
                self.render_inlines(out, children);
                out.push_str("</a>");
            }
            Inline::Image { target, title, alt } => {
                out.push_str("<img src=\"");
                escape_attribute(out, target);
                out.push_str("\" alt=\"");
                escape_attribute(out, alt);
                out.push('"');
                if let Some(title) = title {
                    out.push_str(" title=\"");
                    escape_attribute(out, title);
                    out.push('"');
                }
                out.push_str(" />");
            }
            Inline::RawHtml(html) => out.push_str(html),
            Inline::LineBreak => out.push_str("<br/>\n"),
            Inline::FootnoteReference(label) => {
                let (index, first) = self.refs.index(label);
                log::trace!("Footnote reference [^{label}] is index {index}");
                if first {
                    out.push_str(&format!("<sup id=\"fnref:{index}\">"));
                } else {
                    out.push_str("<sup>");
                }
                out.push_str(&format!(
                    "<a href=\"#fn:{index}\" rel=\"footnote\">{index}</a></sup>"
                ));
            }
        }
    }

    /// Emit the footnote section. Entries are walked by growing index since
    /// a footnote body may itself reference further footnotes.
    fn render_footnote_section(&mut self, out: &mut String) {
        if self.refs.order.is_empty() {
            return;
        }
        out.push_str("<div class=\"footnotes\">\n<hr/>\n<ol>\n");

        let mut index = 0;
        while index < self.refs.order.len() {
            let label = self.refs.order[index].clone();
            index += 1;
            out.push_str(&format!("<li id=\"fn:{index}\">\n"));

            let mut body = String::new();
            if let Some(definition) = self.footnotes.get(&label) {
                self.render_blocks(&mut body, &definition.blocks, false);
            }

            let backref = format!(
                "<a href=\"#fnref:{index}\" rev=\"footnote\">&#8617;</a>"
            );
            // The back reference rides inside the final paragraph when
            // there is one.
            match body.strip_suffix("</p>\n") {
                Some(head) => {
                    out.push_str(head);
                    out.push(' ');
                    out.push_str(&backref);
                    out.push_str("</p>\n");
                }
                None => {
                    out.push_str(&body);
                    out.push_str(&backref);
                    out.push('\n');
                }
            }
            out.push_str("</li>\n");
        }

        out.push_str("</ol>\n</div>\n");
    }
}
