//! Tokens for the Comet language
//!
//! A token is a `(kind, literal)` pair: the kind is one of a closed set of
//! categories and the literal is the exact source text it was scanned from.

use comet_error::span::{Span, Spanned};
use std::fmt;

/// All token kinds of the Comet language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Character the scanner does not recognize
    Illegal,
    /// End of input
    Eof,

    // =========================================
    // Identifiers and literals
    // =========================================
    Ident,
    Int,

    // =========================================
    // Operators
    // =========================================
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `!`
    Bang,
    /// `*`
    Asterisk,
    /// `/`
    Slash,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `==`
    Eq,
    /// `!=`
    NotEq,

    // =========================================
    // Delimiters
    // =========================================
    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // =========================================
    // Keywords
    // =========================================
    /// `fn`
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Looks up a keyword. Any identifier not in the table is `None`.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "fn" => Some(TokenKind::Function),
            "let" => Some(TokenKind::Let),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Classifies a scanned word as a keyword or a plain identifier
    pub fn lookup_ident(ident: &str) -> TokenKind {
        Self::keyword_from_str(ident).unwrap_or(TokenKind::Ident)
    }

    /// Upper-case name used in token dumps and error messages
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Bang => "BANG",
            TokenKind::Asterisk => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::Eq => "EQ",
            TokenKind::NotEq => "NOT_EQ",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }

    /// Source text of fixed-spelling kinds, `None` for identifiers,
    /// literals, `ILLEGAL` and `EOF`
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self {
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "fn",
            TokenKind::Let => "let",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Illegal | TokenKind::Eof | TokenKind::Ident | TokenKind::Int => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token with its location in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text; empty for `EOF`
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// How this token is described in diagnostic labels
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.literal),
        }
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.literal, self.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ident() {
        assert_eq!(TokenKind::lookup_ident("let"), TokenKind::Let);
        assert_eq!(TokenKind::lookup_ident("fn"), TokenKind::Function);
        assert_eq!(TokenKind::lookup_ident("foobar"), TokenKind::Ident);
        // Lookup is case-sensitive
        assert_eq!(TokenKind::lookup_ident("Let"), TokenKind::Ident);
        assert_eq!(TokenKind::lookup_ident("return_"), TokenKind::Ident);
    }

    #[test]
    fn test_keyword_symbols_round_trip() {
        for kind in [
            TokenKind::Function,
            TokenKind::Let,
            TokenKind::True,
            TokenKind::False,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Return,
        ] {
            let spelling = kind.symbol().unwrap();
            assert_eq!(TokenKind::lookup_ident(spelling), kind);
        }
    }

    #[test]
    fn test_display() {
        let token = Token::new(TokenKind::NotEq, "!=", Span::default());
        assert_eq!(token.kind.to_string(), "NOT_EQ");
        assert_eq!(token.to_string(), "NOT_EQ \"!=\" at 0:0");
        assert_eq!(token.describe(), "`!=`");
        assert_eq!(Token::new(TokenKind::Eof, "", Span::default()).describe(), "end of input");
    }
}
