//! comet-parser - Parser for the Comet language
//!
//! Builds an AST from the token stream of a [`comet_lexer::Lexer`]. Errors
//! are accumulated rather than returned, so one pass reports every problem
//! in the input.
//!
//! # Example
//!
//! ```rust
//! use comet_lexer::Lexer;
//! use comet_parser::{parse, Parser};
//!
//! let mut parser = Parser::new(Lexer::new("let x = 1 + 2 * 3;"));
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//! assert_eq!(program.to_string(), "let x = (1 + (2 * 3));");
//!
//! let (_, diagnostics) = parse("let = 5;");
//! assert!(diagnostics.has_errors());
//! ```

pub mod ast;
pub mod parser;
mod trace;

pub use ast::*;
pub use parser::{parse, Parser, Precedence, MAX_NESTING_DEPTH};
