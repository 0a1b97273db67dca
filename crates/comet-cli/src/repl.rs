//! Interactive shell
//!
//! Each line is scanned (and in `ast` mode parsed) on its own; nothing is
//! carried over between lines.

use clap::ValueEnum;
use comet_lexer::Lexer;
use comet_parser::Parser;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "☄ | ";

/// What the shell prints for each line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// One token per line
    #[default]
    Tokens,
    /// The rendered program, or the parser errors
    Ast,
}

/// Runs the shell until `input` reaches end-of-stream
pub fn start<R: BufRead, W: Write>(mut input: R, mut output: W, mode: Mode) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match mode {
            Mode::Tokens => {
                for token in Lexer::new(&line) {
                    writeln!(output, "{}", token)?;
                }
            }
            Mode::Ast => {
                let mut parser = Parser::new(Lexer::new(&line));
                let program = parser.parse_program();
                let errors = parser.errors();

                if errors.is_empty() {
                    writeln!(output, "{}", program)?;
                } else {
                    writeln!(output, "parser errors:")?;
                    for msg in errors {
                        writeln!(output, "\t{}", msg)?;
                    }
                }
            }
        }
    }
}
