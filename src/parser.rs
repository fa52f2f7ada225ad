//! Parser module containing the block parser and inline scanner.

use crate::ast::Block;
use crate::config::Options;
use crate::lines::classify;

pub mod block_parser;
pub mod inline_scanner;

// Re-export commonly used types
pub use block_parser::{
    BlockParser, FootnoteDefinition, FootnoteTable, ReferenceDefinition, ReferenceRegistry,
};
pub use inline_scanner::InlineScanner;

/// Parses Markdown source into a block tree plus the footnote and reference
/// side tables.
///
/// This is the block phase only: paragraph and heading text stays flat and
/// is scanned for inline structure at render time.
///
/// # Examples
///
/// ```rust
/// use footmark::Options;
/// use footmark::parser::parse;
///
/// let (blocks, footnotes, _) = parse("# Heading\n\nText.[^1]\n\n[^1]: A note.\n", &Options::default());
/// assert_eq!(blocks.len(), 2);
/// assert!(footnotes.contains("1"));
/// ```
pub fn parse(input: &str, options: &Options) -> (Vec<Block>, FootnoteTable, ReferenceRegistry) {
    let lines = classify(input);
    BlockParser::new(options).parse(&lines)
}
