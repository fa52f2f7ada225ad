//! footmark compiles extended Markdown to HTML.
//!
//! The dialect is classic Markdown plus a togglable footnote extension:
//! `[^label]` references paired with `[^label]: ...` definitions, rendered
//! as a numbered section at the end of the document.
//!
//! Compilation is split into two phases. [`compile`] builds a [`Document`]
//! from source text and never fails; malformed constructs degrade to literal
//! text. [`render`] turns a compiled document into HTML and can be called
//! any number of times; it only fails on a document that was never compiled.
//!
//! ```rust
//! use footmark::{Options, compile, render};
//!
//! let doc = compile("Hello[^1]\n\n[^1]: A footnote.\n", Options::default());
//! let html = render(&doc).unwrap();
//! assert!(html.contains("class=\"footnotes\""));
//! ```

pub mod ast;
pub mod config;
pub mod lines;
pub mod parser;
mod render;

pub use ast::{Block, Inline, ListKind};
pub use config::Options;
pub use parser::{FootnoteDefinition, FootnoteTable, ReferenceRegistry};

use render::Renderer;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Error returned by [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// The document never completed compilation. This is a programmer error,
    /// distinct from any input condition: empty input compiles to an empty
    /// document that renders to an empty string.
    #[error("document has not been compiled")]
    NotCompiled,
}

/// Compilation state of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
enum DocumentState {
    Uncompiled,
    Compiled {
        blocks: Vec<Block>,
        footnotes: FootnoteTable,
        references: ReferenceRegistry,
    },
}

/// A Markdown document handle.
///
/// Created uncompiled by [`Document::new`], or directly compiled by
/// [`compile`]. After [`Document::compile`] the document is immutable:
/// rendering keeps all of its working state (inline trees, footnote
/// numbering) local to the render call, so a compiled document can be
/// rendered repeatedly, and from multiple threads, with identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    source: String,
    options: Options,
    state: DocumentState,
}

impl Document {
    /// Create an uncompiled document. [`render`] on it fails with
    /// [`RenderError::NotCompiled`] until [`Document::compile`] runs.
    pub fn new(source: impl Into<String>, options: Options) -> Self {
        Self {
            source: source.into(),
            options,
            state: DocumentState::Uncompiled,
        }
    }

    /// Run the structural compile phase. Never fails; compiling twice is a
    /// no-op.
    pub fn compile(&mut self) {
        #[cfg(debug_assertions)]
        init_logger();

        if self.is_compiled() {
            return;
        }
        let (blocks, footnotes, references) = parser::parse(&self.source, &self.options);
        log::debug!(
            "Compiled document: {} blocks, {} footnote definitions",
            blocks.len(),
            footnotes.len()
        );
        self.state = DocumentState::Compiled {
            blocks,
            footnotes,
            references,
        };
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self.state, DocumentState::Compiled { .. })
    }

    /// The source text the document was created from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// The compiled top-level blocks. Empty before compilation.
    pub fn blocks(&self) -> &[Block] {
        match &self.state {
            DocumentState::Compiled { blocks, .. } => blocks,
            DocumentState::Uncompiled => &[],
        }
    }

    /// Look up a footnote definition by label (case-insensitive). This sees
    /// every collected definition, including ones no reference points at.
    pub fn footnote(&self, label: &str) -> Option<&FootnoteDefinition> {
        match &self.state {
            DocumentState::Compiled { footnotes, .. } => footnotes.get(label),
            DocumentState::Uncompiled => None,
        }
    }

    /// Normalized footnote labels in definition order.
    pub fn footnote_labels(&self) -> Vec<&str> {
        match &self.state {
            DocumentState::Compiled { footnotes, .. } => footnotes.labels().collect(),
            DocumentState::Uncompiled => Vec::new(),
        }
    }
}

/// Compile Markdown source into a [`Document`]. Never fails.
pub fn compile(source: impl Into<String>, options: Options) -> Document {
    let mut doc = Document::new(source, options);
    doc.compile();
    doc
}

/// Render a compiled document to HTML.
///
/// Fails only with [`RenderError::NotCompiled`] on a document that never
/// compiled; an empty document renders to an empty string.
pub fn render(doc: &Document) -> Result<String, RenderError> {
    match &doc.state {
        DocumentState::Compiled {
            blocks,
            footnotes,
            references,
        } => Ok(Renderer::new(&doc.options, footnotes, references).render(blocks)),
        DocumentState::Uncompiled => Err(RenderError::NotCompiled),
    }
}

/// Compile and render in one step.
pub fn to_html(source: &str, options: Options) -> String {
    let doc = compile(source, options);
    match render(&doc) {
        Ok(html) => html,
        // compile() always leaves the document compiled.
        Err(RenderError::NotCompiled) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_before_compile_is_a_distinct_error() {
        let doc = Document::new("text", Options::default());
        assert_eq!(render(&doc), Err(RenderError::NotCompiled));
    }

    #[test]
    fn empty_input_renders_empty_string() {
        let doc = compile("", Options::default());
        assert_eq!(render(&doc), Ok(String::new()));
    }

    #[test]
    fn compile_twice_is_a_noop() {
        let mut doc = compile("# Heading\n", Options::default());
        let before = doc.clone();
        doc.compile();
        assert_eq!(doc, before);
    }

    #[test]
    fn document_inspection_api() {
        let doc = compile("text\n\n[^a]: note\n", Options::default());
        assert!(doc.is_compiled());
        assert_eq!(doc.blocks().len(), 1);
        assert!(doc.footnote("A").is_some());
        assert_eq!(doc.footnote_labels(), vec!["a"]);
    }

    #[test]
    fn uncompiled_document_is_empty() {
        let doc = Document::new("text\n\n[^a]: note\n", Options::default());
        assert!(!doc.is_compiled());
        assert!(doc.blocks().is_empty());
        assert_eq!(doc.footnote("a"), None);
    }

    #[test]
    fn render_does_not_mutate_the_document() {
        let doc = compile("a[^1]\n\n[^1]: n\n", Options::default());
        let before = doc.clone();
        let _ = render(&doc);
        assert_eq!(doc, before);
    }
}
