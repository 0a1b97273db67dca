//! AST - Abstract Syntax Tree for the Comet language
//!
//! Every node keeps the token it was parsed from. `Display` renders the
//! canonical text form: infix and prefix expressions are fully
//! parenthesized, so parsing a rendering again yields the same tree.

use comet_error::{Span, Spanned};
use comet_lexer::Token;
use std::fmt;

/// Common interface of all AST nodes
pub trait Node: fmt::Display {
    /// Literal of the token the node was created from
    fn token_literal(&self) -> &str;
}

/// Complete program, the root of every AST
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let(LetStatement),
    /// `return <value>;`
    Return(ReturnStatement),
    /// A bare expression used as a statement
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    /// The `let` token
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    /// The `return` token
    pub token: Token,
    pub return_value: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// First token of the expression
    pub token: Token,
    pub expression: Expression,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    Boolean(Boolean),
    /// `<op><right>`
    Prefix(PrefixExpression),
    /// `<left> <op> <right>`
    Infix(InfixExpression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    pub token: Token,
    pub value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpression {
    /// The operator token, `!` or `-`
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixExpression {
    /// The operator token
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

// =========================================
// Token literals
// =========================================

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(stmt) => &stmt.token.literal,
            Statement::Return(stmt) => &stmt.token.literal,
            Statement::Expression(stmt) => &stmt.token.literal,
        }
    }
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

impl Expression {
    /// The token the expression was created from
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::IntegerLiteral(lit) => &lit.token,
            Expression::Boolean(lit) => &lit.token,
            Expression::Prefix(expr) => &expr.token,
            Expression::Infix(expr) => &expr.token,
        }
    }
}

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

// =========================================
// Rendering
// =========================================

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(stmt) => {
                write!(f, "{} {} = {};", stmt.token.literal, stmt.name, stmt.value)
            }
            Statement::Return(stmt) => write!(f, "{} {};", stmt.token.literal, stmt.return_value),
            Statement::Expression(stmt) => write!(f, "{}", stmt.expression),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(lit) => f.write_str(&lit.token.literal),
            Expression::Boolean(lit) => f.write_str(&lit.token.literal),
            Expression::Prefix(expr) => write!(f, "({}{})", expr.operator, expr.right),
            Expression::Infix(expr) => {
                write!(f, "({} {} {})", expr.left, expr.operator, expr.right)
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

// =========================================
// Spans
// =========================================

impl Spanned for Expression {
    fn span(&self) -> Span {
        match self {
            Expression::Identifier(ident) => ident.token.span,
            Expression::IntegerLiteral(lit) => lit.token.span,
            Expression::Boolean(lit) => lit.token.span,
            Expression::Prefix(expr) => expr.token.span.merge(expr.right.span()),
            Expression::Infix(expr) => expr.left.span().merge(expr.right.span()),
        }
    }
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Let(stmt) => stmt.token.span.merge(stmt.value.span()),
            Statement::Return(stmt) => stmt.token.span.merge(stmt.return_value.span()),
            Statement::Expression(stmt) => stmt.expression.span(),
        }
    }
}
