//! The compiled document tree.
//!
//! Blocks are produced by the block parser during compilation. Inline trees
//! are produced by the inline scanner at render time and are never stored on
//! the document, which keeps a compiled [`crate::Document`] immutable and
//! safe to render from multiple threads.

/// Which kind of list a [`Block::List`] is.
///
/// Bullet lists remember their marker character: a marker change at the same
/// indent (`- a` followed by `* b`) starts a new list rather than merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// Unordered list, with the bullet character (`-`, `*`, or `+`).
    Bullet(char),
    /// Ordered list (`1.`-style markers).
    Ordered,
}

impl ListKind {
    /// Whether two markers continue the same list.
    pub fn matches(self, other: ListKind) -> bool {
        self == other
    }
}

/// A block-level node.
///
/// Container kinds own child blocks; leaf kinds own raw text that the inline
/// scanner interprets at render time. Footnote definitions live in the
/// footnote table, not in the block sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// A paragraph. Lines are joined with `\n`; inline content is scanned at
    /// render time.
    Paragraph { text: String },
    /// An ATX (`# ...`) or setext (`===`/`---` underlined) heading, level 1-6.
    Heading { level: u8, text: String },
    /// An ordered or unordered list. Items are always [`Block::ListItem`].
    List {
        kind: ListKind,
        /// Tight lists render item paragraphs without `<p>` wrapping.
        /// Decided at list-closure time: loose if any blank line separated
        /// two items.
        tight: bool,
        items: Vec<Block>,
    },
    /// One item of a list.
    ListItem { blocks: Vec<Block> },
    /// A `>`-quoted region. Nesting is represented by nested nodes.
    BlockQuote { blocks: Vec<Block> },
    /// Verbatim code, either indented or fenced. The language hint comes from
    /// a fence info string, if any.
    CodeBlock {
        text: String,
        language: Option<String>,
    },
    /// A thematic break (`***`, `---`, `___`).
    HorizontalRule,
    /// A block of raw HTML, passed through the renderer verbatim.
    RawHtml { text: String },
}

/// A span-level node within a block's text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inline {
    /// Plain text. Escaped by the renderer, not by the scanner.
    Text(String),
    /// `*normal*` emphasis.
    Emphasis(Vec<Inline>),
    /// `**strong**` emphasis.
    Strong(Vec<Inline>),
    /// A backtick code span; content is verbatim.
    CodeSpan(String),
    /// An inline, reference, or automatic link.
    Link {
        target: String,
        title: Option<String>,
        children: Vec<Inline>,
    },
    /// An image. The alt text is kept flat.
    Image {
        target: String,
        title: Option<String>,
        alt: String,
    },
    /// A raw HTML span, passed through verbatim.
    RawHtml(String),
    /// A hard line break (two trailing spaces or a trailing backslash).
    LineBreak,
    /// A `[^label]` reference to a defined footnote. References to undefined
    /// labels degrade to literal text and never produce this node.
    FootnoteReference(String),
}

impl Inline {
    /// Convenience constructor used throughout the scanner.
    pub(crate) fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }
}
