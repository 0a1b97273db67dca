//! comet-error - Diagnostics for the Comet language
//!
//! Parse errors are collected, never thrown. This crate provides the error
//! type the parser records, the [`Diagnostic`] it is turned into and a
//! renderer that prints diagnostics in the style of the Rust compiler.
//!
//! # Example
//!
//! ```rust
//! use comet_error::{DiagnosticRenderer, ParseError, SourceCache};
//! use comet_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("repl", "let x 5;");
//!
//! let span = Span::new(Position::new(1, 7, 6), Position::new(1, 8, 7), file_id);
//! let diagnostic = ParseError::UnexpectedToken {
//!     expected: "ASSIGN".into(),
//!     found: "INT".into(),
//! }
//! .into_diagnostic(span, "found `5`");
//!
//! let renderer = DiagnosticRenderer::new(&cache).without_colors();
//! println!("{}", renderer.render(&diagnostic));
//! ```

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, SourceCache, SourceFile};
pub use error::ParseError;
pub use span::{Position, Span, Spanned};

/// Ordered collection of diagnostics accumulated during a parse
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// The plain messages, in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.items.iter().map(|d| d.message.clone()).collect()
    }

    pub fn render_with(&self, renderer: &DiagnosticRenderer<'_>) -> String {
        self.items
            .iter()
            .map(|d| renderer.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
