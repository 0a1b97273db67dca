//! Lexer for the Comet language
//!
//! Produces one token per call to [`Lexer::next_token`]. Scanning is a single
//! pass with one character of lookahead, used only for `==` and `!=`.

use crate::token::{Token, TokenKind};
use comet_error::span::{Position, Span};

/// The Comet language Lexer
pub struct Lexer<'src> {
    /// Source code being scanned
    source: &'src str,
    /// Source code characters
    chars: Vec<char>,
    /// Index of the current character in `chars`
    pos: usize,
    /// Current line (1-indexed)
    line: u32,
    /// Current column (1-indexed)
    column: u32,
    /// Byte offset of the current character
    offset: usize,
    /// Source ID, for diagnostics
    file_id: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer for a standalone source (file id 0)
    pub fn new(source: &'src str) -> Self {
        Self::with_file_id(source, 0)
    }

    /// Creates a lexer whose spans refer to `file_id` in a `SourceCache`
    pub fn with_file_id(source: &'src str, file_id: u32) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            offset: 0,
            file_id,
        }
    }

    pub fn file_id(&self) -> u32 {
        self.file_id
    }

    /// Returns the current character without advancing
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Returns the character after the current one
    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.offset += ch.len_utf8();

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    /// Builds a token whose literal is the source text from `start` to here
    fn make_token(&self, kind: TokenKind, start: Position) -> Token {
        let span = Span::new(start, self.current_position(), self.file_id);
        Token::new(kind, &self.source[start.offset..self.offset], span)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// Reads a maximal run of letters and underscores
    fn read_identifier(&mut self) -> Token {
        let start = self.current_position();
        while self.peek().is_some_and(is_letter) {
            self.advance();
        }

        let ident = &self.source[start.offset..self.offset];
        self.make_token(TokenKind::lookup_ident(ident), start)
    }

    /// Reads a maximal run of decimal digits
    fn read_number(&mut self) -> Token {
        let start = self.current_position();
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
        self.make_token(TokenKind::Int, start)
    }

    /// Reads the next token. Once the input is exhausted every call
    /// returns `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current_position();
        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, "", Span::point(start, self.file_id));
        };

        // Identifiers, keywords and numbers return early: their readers
        // already stopped on the first character past the token.
        if is_letter(ch) {
            return traced(self.read_identifier());
        }
        if ch.is_ascii_digit() {
            return traced(self.read_number());
        }

        let kind = match ch {
            '=' if self.peek_char() == Some('=') => {
                self.advance();
                TokenKind::Eq
            }
            '!' if self.peek_char() == Some('=') => {
                self.advance();
                TokenKind::NotEq
            }
            '=' => TokenKind::Assign,
            '!' => TokenKind::Bang,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => TokenKind::Illegal,
        };
        self.advance();

        traced(self.make_token(kind, start))
    }

    /// Scans the whole input, including the final `EOF` token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        tokens
    }
}

/// Yields every token up to, but not including, `EOF`
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is_eof()).then_some(token)
    }
}

fn traced(token: Token) -> Token {
    tracing::trace!(kind = %token.kind, literal = %token.literal, at = %token.span.start, "scanned token");
    token
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Tokenizes source code, including the final `EOF`
pub fn tokenize(source: &str, file_id: u32) -> Vec<Token> {
    Lexer::with_file_id(source, file_id).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source, 0).into_iter().map(|t| t.kind).collect()
    }

    fn pairs(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source, 0)
            .into_iter()
            .map(|t| (t.kind, t.literal))
            .collect()
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            kinds("=+(){},;"),
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_program() {
        let source = "let five = 5;\nlet add = fn(x, y) {\n  x + y;\n};\nlet result = add(five, 10);";
        let expected: Vec<(TokenKind, &str)> = vec![
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::Function, "fn"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "y"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Ident, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Ident, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "result"),
            (TokenKind::Assign, "="),
            (TokenKind::Ident, "add"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Int, "10"),
            (TokenKind::RParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];
        let expected: Vec<(TokenKind, String)> =
            expected.into_iter().map(|(k, l)| (k, l.to_string())).collect();

        assert_eq!(pairs(source), expected);
    }

    #[test]
    fn test_operators_and_keywords() {
        assert_eq!(
            kinds("!-/*5; 5 < 10 > 5; if (5 < 10) { return true; } else { return false; } 10 == 10; 10 != 9;"),
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::Gt,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::If,
                TokenKind::LParen,
                TokenKind::Int,
                TokenKind::Lt,
                TokenKind::Int,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::True,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Else,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::False,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Int,
                TokenKind::Eq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::NotEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators_need_adjacent_chars() {
        assert_eq!(
            pairs("= = ! ="),
            vec![
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Bang, "!".to_string()),
                (TokenKind::Assign, "=".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
        assert_eq!(kinds("==="), vec![TokenKind::Eq, TokenKind::Assign, TokenKind::Eof]);
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            pairs("foobar _tmp snake_case"),
            vec![
                (TokenKind::Ident, "foobar".to_string()),
                (TokenKind::Ident, "_tmp".to_string()),
                (TokenKind::Ident, "snake_case".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
        // Digits are not part of identifiers
        assert_eq!(kinds("x1"), vec![TokenKind::Ident, TokenKind::Int, TokenKind::Eof]);
        // A keyword prefix does not make a keyword
        assert_eq!(kinds("letter"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_illegal_characters() {
        assert_eq!(
            pairs("a @ é"),
            vec![
                (TokenKind::Ident, "a".to_string()),
                (TokenKind::Illegal, "@".to_string()),
                (TokenKind::Illegal, "é".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::Eof);
            assert_eq!(token.literal, "");
        }
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds(" \t\r\n  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("let x\n  == 42", 3);

        assert_eq!(tokens[1].span.start, Position::new(1, 5, 4));
        assert_eq!(tokens[2].span.start, Position::new(2, 3, 8));
        assert_eq!(tokens[2].span.end, Position::new(2, 5, 10));
        assert_eq!(tokens[3].span.len(), 2);
        assert!(tokens.iter().all(|t| t.span.file_id == 3));
        assert!(tokens[4].span.is_empty());
    }

    #[test]
    fn test_iterator_stops_before_eof() {
        let literals: Vec<String> = Lexer::new("a + 1").map(|t| t.literal).collect();
        assert_eq!(literals, vec!["a", "+", "1"]);
    }
}
