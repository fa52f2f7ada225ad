//! The block parser.
//!
//! Consumes classified lines top to bottom and builds the block tree,
//! populating the footnote table and reference registry on the side.
//! Containers (blockquotes, list items, footnote bodies) strip their markers
//! and re-feed the inner lines recursively, so nesting is recursion depth
//! rather than an explicit container stack.
//!
//! There is no failure path: any line not matching a more specific rule is
//! paragraph text, and nesting beyond [`MAX_NESTING`] degrades to flat
//! paragraphs instead of overflowing the stack.

use crate::ast::Block;
use crate::config::Options;
use crate::lines::{ClassifiedLine, LineKind};

mod blockquotes;
mod code_blocks;
pub mod footnotes;
mod headings;
mod horizontal_rules;
mod html_blocks;
mod indented_code;
mod lists;
pub mod reference_definitions;
pub(crate) mod utils;

use blockquotes::collect_blockquote;
use code_blocks::{parse_fenced_code_block, try_parse_fence_open};
use footnotes::collect_footnote_definition;
pub use footnotes::{FootnoteDefinition, FootnoteTable};
use headings::{setext_level, try_parse_atx_heading};
use horizontal_rules::try_parse_horizontal_rule;
use html_blocks::{is_html_block_start, parse_html_block};
use indented_code::parse_indented_code;
use lists::{ListMarkerInfo, collect_item_lines, try_parse_list_marker};
pub use reference_definitions::{ReferenceDefinition, ReferenceRegistry};
use reference_definitions::try_parse_reference_definition;

/// Container nesting cap. Markers nested deeper than this are treated as
/// paragraph text rather than risking unbounded recursion.
pub(crate) const MAX_NESTING: usize = 64;

pub struct BlockParser<'a> {
    options: &'a Options,
    footnotes: FootnoteTable,
    references: ReferenceRegistry,
}

impl<'a> BlockParser<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self {
            options,
            footnotes: FootnoteTable::new(),
            references: ReferenceRegistry::new(),
        }
    }

    /// Parse a whole document's worth of lines.
    pub fn parse(
        mut self,
        lines: &[ClassifiedLine],
    ) -> (Vec<Block>, FootnoteTable, ReferenceRegistry) {
        log::debug!("Starting block parse of {} lines", lines.len());
        let blocks = self.parse_blocks(lines, 0);
        (blocks, self.footnotes, self.references)
    }

    /// Parse a line sequence at the given nesting depth.
    pub(crate) fn parse_blocks(&mut self, lines: &[ClassifiedLine], depth: usize) -> Vec<Block> {
        if depth >= MAX_NESTING {
            log::debug!("Nesting cap reached; flattening {} lines", lines.len());
            return flatten_to_paragraphs(lines);
        }

        let mut blocks: Vec<Block> = Vec::new();
        let mut para: Vec<&str> = Vec::new();
        let mut pos = 0;

        while pos < lines.len() {
            let line = &lines[pos];
            log::trace!("line {} [{:?}]: {:?}", pos, line.kind, line.text);

            if line.is_blank() {
                flush_paragraph(&mut blocks, &mut para);
                pos += 1;
                continue;
            }

            // Setext lookahead: an underline directly below paragraph text
            // turns the preceding line into a heading.
            if !para.is_empty()
                && let LineKind::SetextUnderline(_) = line.kind
                && let Some(level) = setext_level(line.rest())
            {
                let text = para.pop().unwrap_or_default().trim_end().to_string();
                flush_paragraph(&mut blocks, &mut para);
                blocks.push(Block::Heading { level, text });
                pos += 1;
                continue;
            }

            // An indented line below an open paragraph is a lazy
            // continuation, not code.
            if line.kind == LineKind::IndentedCode {
                if para.is_empty() {
                    flush_paragraph(&mut blocks, &mut para);
                    let (next, block) = parse_indented_code(lines, pos);
                    blocks.push(block);
                    pos = next;
                } else {
                    para.push(line.rest());
                    pos += 1;
                }
                continue;
            }

            // Horizontal rules outrank list markers and setext dashes when
            // no paragraph is open.
            if try_parse_horizontal_rule(line.rest()).is_some() {
                flush_paragraph(&mut blocks, &mut para);
                blocks.push(Block::HorizontalRule);
                pos += 1;
                continue;
            }

            if self.options.footnotes
                && line.kind == LineKind::FootnoteDefinition
                && let Some((next, label, body)) = collect_footnote_definition(lines, pos)
            {
                flush_paragraph(&mut blocks, &mut para);
                let body_blocks = self.parse_blocks(&body, depth + 1);
                self.footnotes.insert(FootnoteDefinition {
                    label,
                    blocks: body_blocks,
                });
                pos = next;
                continue;
            }

            if line.kind == LineKind::AtxHeading
                && let Some((level, text)) = try_parse_atx_heading(line.rest())
            {
                flush_paragraph(&mut blocks, &mut para);
                blocks.push(Block::Heading {
                    level,
                    text: text.to_string(),
                });
                pos += 1;
                continue;
            }

            if line.kind == LineKind::QuoteMarker {
                flush_paragraph(&mut blocks, &mut para);
                let (next, inner) = collect_blockquote(lines, pos);
                let inner_blocks = self.parse_blocks(&inner, depth + 1);
                blocks.push(Block::BlockQuote {
                    blocks: inner_blocks,
                });
                pos = next;
                continue;
            }

            if line.kind == LineKind::ListMarker
                && let Some(info) = try_parse_list_marker(line)
            {
                flush_paragraph(&mut blocks, &mut para);
                let (next, list) = self.parse_list(lines, pos, depth, info);
                blocks.push(list);
                pos = next;
                continue;
            }

            if try_parse_fence_open(line.rest()).is_some()
                && let Some((next, block)) = parse_fenced_code_block(lines, pos)
            {
                flush_paragraph(&mut blocks, &mut para);
                blocks.push(block);
                pos = next;
                continue;
            }

            // Reference definitions and HTML blocks need a preceding blank
            // line (they never interrupt a paragraph).
            if para.is_empty() {
                if line.indent == 0
                    && let Some((label, url, title)) =
                        try_parse_reference_definition(line.rest())
                {
                    self.references.add(label, url, title);
                    pos += 1;
                    continue;
                }
                if depth == 0 && is_html_block_start(line.rest()) {
                    let (next, block) = parse_html_block(lines, pos);
                    blocks.push(block);
                    pos = next;
                    continue;
                }
            }

            para.push(line.rest());
            pos += 1;
        }

        flush_paragraph(&mut blocks, &mut para);
        blocks
    }

    /// Parse a run of list items of one kind into a list block.
    fn parse_list(
        &mut self,
        lines: &[ClassifiedLine],
        start: usize,
        depth: usize,
        first: ListMarkerInfo,
    ) -> (usize, Block) {
        let kind = first.kind;
        let mut items = Vec::new();
        let mut loose = false;
        let mut pos = start;

        loop {
            let Some(info) = lines.get(pos).and_then(try_parse_list_marker) else {
                break;
            };
            if !info.kind.matches(kind) {
                break;
            }
            let (next, item_lines, _) = collect_item_lines(lines, pos, info);
            let item_blocks = self.parse_blocks(&item_lines, depth + 1);
            items.push(Block::ListItem {
                blocks: item_blocks,
            });

            // Another item of the same kind past any blank lines continues
            // the list; a blank between items makes it loose.
            let mut peek = next;
            while peek < lines.len() && lines[peek].is_blank() {
                peek += 1;
            }
            match lines.get(peek).and_then(try_parse_list_marker) {
                Some(n) if n.kind.matches(kind) => {
                    if peek > next {
                        loose = true;
                    }
                    pos = peek;
                }
                _ => {
                    pos = next;
                    break;
                }
            }
        }

        log::debug!(
            "Closed {:?} list with {} items ({})",
            kind,
            items.len(),
            if loose { "loose" } else { "tight" }
        );
        (
            pos,
            Block::List {
                kind,
                tight: !loose,
                items,
            },
        )
    }
}

fn flush_paragraph(blocks: &mut Vec<Block>, para: &mut Vec<&str>) {
    if para.is_empty() {
        return;
    }
    let text = para.join("\n").trim_end().to_string();
    para.clear();
    if !text.is_empty() {
        blocks.push(Block::Paragraph { text });
    }
}

/// Degraded parse used past the nesting cap: every non-blank run is a
/// paragraph, markers and all.
fn flatten_to_paragraphs(lines: &[ClassifiedLine]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut para: Vec<&str> = Vec::new();
    for line in lines {
        if line.is_blank() {
            flush_paragraph(&mut blocks, &mut para);
        } else {
            para.push(line.rest());
        }
    }
    flush_paragraph(&mut blocks, &mut para);
    blocks
}

#[cfg(test)]
mod tests {
    mod footnote_collection;
    mod helpers;
    mod lists;
    mod structure;
}
