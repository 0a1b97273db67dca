//! comet-lexer - Lexer for the Comet language
//!
//! Turns source text into tokens, one at a time, on demand.
//!
//! # Example
//!
//! ```rust
//! use comet_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("let answer = 42;");
//!
//! loop {
//!     let token = lexer.next_token();
//!     println!("{}", token);
//!     if token.kind == TokenKind::Eof {
//!         break;
//!     }
//! }
//! ```

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
