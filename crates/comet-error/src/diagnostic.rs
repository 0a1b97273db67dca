//! Diagnostic - rustc-style reports for parse errors
//!
//! A diagnostic is always an error. It carries an optional code, the
//! message, labels pointing into the source and help lines.
//! [`DiagnosticRenderer`] turns it into text against a [`SourceCache`].

use crate::span::Span;
use std::fmt;

/// A label pointing to a region of the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Primary labels are underlined with `^`, secondary ones with `-`
    pub primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: false,
        }
    }
}

/// Structured error code, rendered as `E<category><number>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// Category (P = Parser)
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    pub const UNEXPECTED_TOKEN: Self = Self::new('P', 1);
    pub const NO_PREFIX_PARSE_FN: Self = Self::new('P', 2);
    pub const INVALID_INTEGER: Self = Self::new('P', 3);
    pub const NESTING_TOO_DEEP: Self = Self::new('P', 4);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A complete diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a primary label
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Source texts known to the renderer, addressed by file id
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset where each line starts
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Text of a 1-indexed line, without its line terminator
    pub fn line(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source and returns its id
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics as text
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let reset = self.paint("\x1b[0m");
        let bold = self.paint("\x1b[1m");
        let blue = self.paint("\x1b[1;34m");
        let red = self.paint("\x1b[1;31m");

        // error[EP001]: message
        let code = diagnostic
            .code
            .map(|code| format!("[{}]", code))
            .unwrap_or_default();
        let mut output = format!(
            "{red}error{code}{reset}{bold}: {}{reset}\n",
            diagnostic.message
        );

        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };
            let start = label.span.start;
            output.push_str(&format!(" {blue}-->{reset} {}:{}\n", file.name, start));

            let Some(text) = file.line(start.line) else {
                continue;
            };
            let gutter = " ".repeat(start.line.to_string().len());
            let width = if label.span.end.line == start.line {
                label.span.end.column.saturating_sub(start.column).max(1) as usize
            } else {
                text.len().saturating_sub(start.column as usize - 1).max(1)
            };
            let (marker, marker_color) = if label.primary {
                ('^', red)
            } else {
                ('-', blue)
            };

            output.push_str(&format!(" {gutter} {blue}|{reset}\n"));
            output.push_str(&format!(" {blue}{}{reset} | {}\n", start.line, text));
            output.push_str(&format!(
                " {gutter} {blue}|{reset} {}{marker_color}{} {}{reset}\n",
                " ".repeat(start.column.saturating_sub(1) as usize),
                marker.to_string().repeat(width),
                label.message
            ));
        }

        let green = self.paint("\x1b[1;32m");
        for help in &diagnostic.help {
            output.push_str(&format!("   = {green}help{reset}: {}\n", help));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Position;

    #[test]
    fn test_diagnostic_rendering() {
        let mut cache = SourceCache::new();
        let file_id = cache.add("repl", "let x 5;");

        let found = Span::new(Position::new(1, 7, 6), Position::new(1, 8, 7), file_id);
        let after = Span::new(Position::new(1, 5, 4), Position::new(1, 6, 5), file_id);

        let diagnostic = Diagnostic::error("expected next token to be ASSIGN, got INT instead")
            .with_code(ErrorCode::UNEXPECTED_TOKEN)
            .with_label(found, "found `5`")
            .with_secondary_label(after, "expected `=` after this")
            .with_help("a binding is written `let <name> = <value>;`");

        let output = DiagnosticRenderer::new(&cache).without_colors().render(&diagnostic);

        assert!(output.starts_with("error[EP001]: expected next token to be ASSIGN"));
        assert!(output.contains("--> repl:1:7"));
        assert!(output.contains("1 | let x 5;"));
        assert!(output.contains("      ^ found `5`"));
        assert!(output.contains("    - expected `=` after this"));
        assert!(output.contains("= help: a binding is written"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_line_lookup() {
        let file = SourceFile::new("input", "a\r\nbb\nccc");
        assert_eq!(file.line(1), Some("a"));
        assert_eq!(file.line(2), Some("bb"));
        assert_eq!(file.line(3), Some("ccc"));
        assert_eq!(file.line(4), None);
        assert_eq!(file.line(0), None);
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NO_PREFIX_PARSE_FN.to_string(), "EP002");
    }
}
