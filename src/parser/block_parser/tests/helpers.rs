use crate::ast::Block;
use crate::config::Options;
use crate::lines::classify;
use crate::parser::block_parser::{BlockParser, FootnoteTable, ReferenceRegistry};

pub(crate) fn parse_doc(input: &str) -> (Vec<Block>, FootnoteTable, ReferenceRegistry) {
    let options = Options::default();
    let lines = classify(input);
    BlockParser::new(&options).parse(&lines)
}

pub(crate) fn parse_blocks(input: &str) -> Vec<Block> {
    parse_doc(input).0
}

pub(crate) fn block_name(block: &Block) -> &'static str {
    match block {
        Block::Paragraph { .. } => "paragraph",
        Block::Heading { .. } => "heading",
        Block::List { .. } => "list",
        Block::ListItem { .. } => "list-item",
        Block::BlockQuote { .. } => "blockquote",
        Block::CodeBlock { .. } => "code",
        Block::HorizontalRule => "hr",
        Block::RawHtml { .. } => "html",
    }
}

/// Assert the top-level block kinds produced for an input.
pub(crate) fn assert_block_kinds(input: &str, expected: &[&str]) {
    let blocks = parse_blocks(input);
    let kinds: Vec<&str> = blocks.iter().map(block_name).collect();
    assert_eq!(kinds, expected, "block kinds for {input:?}");
}
