//! Parse errors
//!
//! The parser never aborts: each of these is recorded as a [`Diagnostic`]
//! and parsing resumes at the next token.

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::span::Span;
use thiserror::Error;

/// A recoverable error found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lookahead token is not the one the construct requires
    #[error("expected next token to be {expected}, got {found} instead")]
    UnexpectedToken { expected: String, found: String },

    /// No expression can start with this token kind
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFn { kind: String },

    /// Integer literal that is not a base-10 `i64`
    #[error("could not parse {literal:?} as integer")]
    InvalidInteger { literal: String },

    /// Expression nested past the parser's recursion limit
    #[error("expression nesting is too deep (maximum depth {limit})")]
    NestingTooDeep { limit: usize },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnexpectedToken { .. } => ErrorCode::UNEXPECTED_TOKEN,
            ParseError::NoPrefixParseFn { .. } => ErrorCode::NO_PREFIX_PARSE_FN,
            ParseError::InvalidInteger { .. } => ErrorCode::INVALID_INTEGER,
            ParseError::NestingTooDeep { .. } => ErrorCode::NESTING_TOO_DEEP,
        }
    }

    /// Builds a diagnostic with a primary label at `span`
    pub fn into_diagnostic(self, span: Span, label: impl Into<String>) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .with_code(self.code())
            .with_label(span, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ParseError::UnexpectedToken {
            expected: "ASSIGN".into(),
            found: "INT".into(),
        };
        assert_eq!(err.to_string(), "expected next token to be ASSIGN, got INT instead");

        let err = ParseError::NoPrefixParseFn { kind: "SEMICOLON".into() };
        assert_eq!(err.to_string(), "no prefix parse function for SEMICOLON found");

        let err = ParseError::InvalidInteger {
            literal: "92233720368547758070".into(),
        };
        assert_eq!(err.to_string(), "could not parse \"92233720368547758070\" as integer");

        let err = ParseError::NestingTooDeep { limit: 256 };
        assert_eq!(err.to_string(), "expression nesting is too deep (maximum depth 256)");
        assert_eq!(err.code().to_string(), "EP004");
    }

    #[test]
    fn test_into_diagnostic_keeps_code() {
        let diagnostic = ParseError::NoPrefixParseFn { kind: "RPAREN".into() }
            .into_diagnostic(Span::default(), "expected an expression");
        assert_eq!(diagnostic.code, Some(ErrorCode::NO_PREFIX_PARSE_FN));
        assert_eq!(diagnostic.labels.len(), 1);
        assert!(diagnostic.labels[0].primary);
    }
}
