//! Compiler options.
//!
//! The dialect is classic Markdown plus togglable extensions. Options are an
//! explicit value passed into [`crate::compile`], never process-wide state.

/// Extension flags recognized by the compiler.
///
/// The default configuration enables footnotes, matching the contract the
/// library was extracted from (a converter invoked with the footnote
/// extension always on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Recognize `[^label]` references and `[^label]:` definitions.
    ///
    /// When disabled, both forms are ordinary paragraph text.
    pub footnotes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { footnotes: true }
    }
}

impl Options {
    /// Options with every extension disabled (the base dialect).
    pub fn base() -> Self {
        Self { footnotes: false }
    }

    /// Set the footnote extension flag.
    pub fn footnotes(mut self, enabled: bool) -> Self {
        self.footnotes = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_footnotes() {
        assert!(Options::default().footnotes);
    }

    #[test]
    fn base_dialect_disables_footnotes() {
        assert!(!Options::base().footnotes);
    }

    #[test]
    fn builder_style_toggle() {
        let opts = Options::default().footnotes(false);
        assert_eq!(opts, Options::base());
    }
}
