//! Parser for the Comet language
//!
//! Statements are parsed by recursive descent; expressions by Pratt parsing
//! (top-down operator precedence). Each token kind can register a prefix
//! handler, used when the token starts an expression, and an infix handler,
//! used when it follows a complete left operand. A precedence table decides
//! how far an infix chain extends.
//!
//! Errors never abort the parse. They are recorded as diagnostics, the
//! construct being parsed is dropped and [`Parser::parse_program`] resumes at
//! the next token.

use crate::ast::*;
use crate::trace::Trace;
use comet_error::{Diagnostic, Diagnostics, ParseError, Span};
use comet_lexer::{Lexer, Token, TokenKind};
use std::collections::HashMap;

/// Binding power of operators, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Precedence of a token in infix position; `Lowest` when the kind is not
    /// an infix operator
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            _ => Precedence::Lowest,
        }
    }
}

/// Deepest parse call allowed inside an expression. Every grouping or prefix
/// operator adds two levels, so this admits about 128 nested operands.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Builds an expression from the current token. The `usize` is the trace depth.
type PrefixParseFn<'src> = fn(&mut Parser<'src>, usize) -> Option<Expression>;
/// Builds an expression from a parsed left operand and the current (operator) token
type InfixParseFn<'src> = fn(&mut Parser<'src>, Expression, usize) -> Option<Expression>;

/// Parser for the Comet language
pub struct Parser<'src> {
    lexer: Lexer<'src>,

    cur_token: Token,
    peek_token: Token,

    /// Accumulated errors, in the order they were found
    diagnostics: Diagnostics,

    prefix_parse_fns: HashMap<TokenKind, PrefixParseFn<'src>>,
    infix_parse_fns: HashMap<TokenKind, InfixParseFn<'src>>,
}

impl<'src> Parser<'src> {
    /// Creates a parser and fills the two-token window, so `cur_token` is
    /// the first token of the input and `peek_token` the second
    pub fn new(lexer: Lexer<'src>) -> Self {
        let empty = Token::new(TokenKind::Eof, "", Span::point(Default::default(), lexer.file_id()));
        let mut parser = Self {
            lexer,
            cur_token: empty.clone(),
            peek_token: empty,
            diagnostics: Diagnostics::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };

        parser.register_prefix(TokenKind::Ident, Self::parse_identifier);
        parser.register_prefix(TokenKind::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenKind::True, Self::parse_boolean);
        parser.register_prefix(TokenKind::False, Self::parse_boolean);
        parser.register_prefix(TokenKind::Bang, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Self::parse_grouped_expression);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
        ] {
            parser.register_infix(kind, Self::parse_infix_expression);
        }

        parser.next_token();
        parser.next_token();
        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, handler: PrefixParseFn<'src>) {
        self.prefix_parse_fns.insert(kind, handler);
    }

    fn register_infix(&mut self, kind: TokenKind, handler: InfixParseFn<'src>) {
        self.infix_parse_fns.insert(kind, handler);
    }

    /// Messages of the errors recorded so far, in order
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.messages()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consumes and returns the diagnostics
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================
    // Token window
    // =========================================

    /// Shifts the lookahead into the current slot and scans a new lookahead
    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur_token = std::mem::replace(&mut self.peek_token, next);
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.is(kind)
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.is(kind)
    }

    /// Advances if the lookahead is `kind`. Otherwise records an error and
    /// leaves the window untouched.
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_token_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.peek_error(kind);
            None
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek_token.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(self.cur_token.kind)
    }

    // =========================================
    // Errors
    // =========================================

    fn record(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = ?diagnostic.code, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    fn peek_error(&mut self, expected: TokenKind) {
        let wanted = match expected {
            TokenKind::Ident => "an identifier".to_string(),
            _ => expected
                .symbol()
                .map(|symbol| format!("`{}`", symbol))
                .unwrap_or_else(|| expected.to_string()),
        };

        let diagnostic = ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.peek_token.kind.to_string(),
        }
        .into_diagnostic(self.peek_token.span, format!("found {}", self.peek_token.describe()))
        .with_secondary_label(self.cur_token.span, format!("expected {} after this", wanted));

        self.record(diagnostic);
    }

    fn no_prefix_parse_fn_error(&mut self) {
        let token = &self.cur_token;
        let error = ParseError::NoPrefixParseFn {
            kind: token.kind.to_string(),
        };

        let diagnostic = match token.kind {
            TokenKind::Illegal => error
                .into_diagnostic(token.span, "unrecognized character")
                .with_help(format!("remove {}", token.describe())),
            TokenKind::Eof => error.into_diagnostic(token.span, "expected an expression before the end of input"),
            _ => error.into_diagnostic(token.span, format!("{} cannot start an expression", token.describe())),
        };

        self.record(diagnostic);
    }

    // =========================================
    // Statements
    // =========================================

    /// Parses the whole input. Always advances at least one token per
    /// statement, so malformed input cannot stall the loop.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement(0) {
                program.statements.push(stmt);
            }
            self.next_token();
        }

        tracing::debug!(
            statements = program.statements.len(),
            errors = self.diagnostics.len(),
            "parsed program"
        );
        program
    }

    fn parse_statement(&mut self, depth: usize) -> Option<Statement> {
        match self.cur_token.kind {
            TokenKind::Let => self.parse_let_statement(depth).map(Statement::Let),
            TokenKind::Return => self.parse_return_statement(depth).map(Statement::Return),
            _ => self.parse_expression_statement(depth).map(Statement::Expression),
        }
    }

    /// Parse: `let <ident> = <expr> [;]`
    fn parse_let_statement(&mut self, depth: usize) -> Option<LetStatement> {
        let _trace = Trace::begin("parse_let_statement", depth);
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        };

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest, depth + 1)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(LetStatement { token, name, value })
    }

    /// Parse: `return <expr> [;]`
    fn parse_return_statement(&mut self, depth: usize) -> Option<ReturnStatement> {
        let _trace = Trace::begin("parse_return_statement", depth);
        let token = self.cur_token.clone();
        self.next_token();

        let return_value = self.parse_expression(Precedence::Lowest, depth + 1)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(ReturnStatement { token, return_value })
    }

    /// Parse: `<expr> [;]`. The semicolon is optional so a single
    /// expression can be typed at the prompt.
    fn parse_expression_statement(&mut self, depth: usize) -> Option<ExpressionStatement> {
        let _trace = Trace::begin("parse_expression_statement", depth);
        let token = self.cur_token.clone();

        let expression = self.parse_expression(Precedence::Lowest, depth + 1)?;

        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(ExpressionStatement { token, expression })
    }

    // =========================================
    // Expressions
    // =========================================

    /// Precedence climbing. Keeps folding infix operators into `left` while
    /// the next operator binds tighter than `precedence`; equal precedence
    /// stops the loop, which makes operators left-associative.
    fn parse_expression(&mut self, precedence: Precedence, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_expression", depth);

        if depth > MAX_NESTING_DEPTH {
            let diagnostic = ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            }
            .into_diagnostic(self.cur_token.span, "nested too deeply here")
            .with_help("split the expression with `let` bindings");
            self.record(diagnostic);
            return None;
        }

        let Some(prefix) = self.prefix_parse_fns.get(&self.cur_token.kind).copied() else {
            self.no_prefix_parse_fn_error();
            return None;
        };
        let mut left = prefix(self, depth + 1)?;

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_parse_fns.get(&self.peek_token.kind).copied() else {
                return Some(left);
            };

            self.next_token();
            left = infix(self, left, depth + 1)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_identifier", depth);
        Some(Expression::Identifier(Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.clone(),
        }))
    }

    fn parse_integer_literal(&mut self, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_integer_literal", depth);

        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral {
                token: self.cur_token.clone(),
                value,
            })),
            Err(err) => {
                let diagnostic = ParseError::InvalidInteger {
                    literal: self.cur_token.literal.clone(),
                }
                .into_diagnostic(self.cur_token.span, err.to_string())
                .with_help(format!("integers range from {} to {}", i64::MIN, i64::MAX));
                self.record(diagnostic);
                None
            }
        }
    }

    fn parse_boolean(&mut self, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_boolean", depth);
        Some(Expression::Boolean(Boolean {
            token: self.cur_token.clone(),
            value: self.cur_token_is(TokenKind::True),
        }))
    }

    /// Parse: `<op><expr>`, the operand bound at prefix precedence
    fn parse_prefix_expression(&mut self, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_prefix_expression", depth);
        let token = self.cur_token.clone();
        self.next_token();

        let right = self.parse_expression(Precedence::Prefix, depth + 1)?;

        Some(Expression::Prefix(PrefixExpression {
            operator: token.literal.clone(),
            token,
            right: Box::new(right),
        }))
    }

    /// Parse: `<left> <op> <expr>`. The right operand is parsed at the
    /// operator's own precedence.
    fn parse_infix_expression(&mut self, left: Expression, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_infix_expression", depth);
        let token = self.cur_token.clone();
        let precedence = self.cur_precedence();
        self.next_token();

        let right = self.parse_expression(precedence, depth + 1)?;

        Some(Expression::Infix(InfixExpression {
            operator: token.literal.clone(),
            token,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// Parse: `( <expr> )`. Yields the inner expression; grouping only
    /// affects the shape of the tree.
    fn parse_grouped_expression(&mut self, depth: usize) -> Option<Expression> {
        let _trace = Trace::begin("parse_grouped_expression", depth);
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest, depth + 1)?;
        self.expect_peek(TokenKind::RParen)?;

        Some(expression)
    }
}

/// Parses a standalone source (file id 0)
pub fn parse(source: &str) -> (Program, Diagnostics) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.take_diagnostics())
}
