//! End-to-end tests for the Comet front end
//!
//! Source → Lexer → Parser → rendered program

use comet_lexer::Lexer;
use comet_parser::{Parser, Program};

/// Parses `source`, returning the program and the error messages in order
pub fn parse_source(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.errors())
}

/// Asserts that `source` parses without errors and renders as `expected`
pub fn assert_renders(source: &str, expected: &str) {
    let (program, errors) = parse_source(source);
    if !errors.is_empty() {
        panic!("Expected {:?} to parse, but got errors:\n{:#?}", source, errors);
    }
    assert_eq!(program.to_string(), expected, "rendering of {:?}", source);
}

/// Asserts that rendering `source` and parsing the rendering again yields
/// the same text.
///
/// Only holds for a single statement or for statements that each render
/// with a closing `;`. Bare expression statements render back to back, so
/// `le; t` renders as `let` and no longer parses.
pub fn assert_round_trip(source: &str) {
    let (program, errors) = parse_source(source);
    if !errors.is_empty() {
        panic!("Expected {:?} to parse, but got errors:\n{:#?}", source, errors);
    }

    let rendered = program.to_string();
    let (reparsed, errors) = parse_source(&rendered);
    if !errors.is_empty() {
        panic!("Rendering {:?} does not parse:\n{:#?}", rendered, errors);
    }
    assert_eq!(reparsed.to_string(), rendered, "round trip of {:?}", source);
    assert_eq!(reparsed.statements.len(), program.statements.len());
}

/// Asserts that parsing `source` records `expected` among its errors
pub fn assert_parse_error(source: &str, expected: &str) {
    let (_, errors) = parse_source(source);
    if !errors.iter().any(|e| e == expected) {
        panic!(
            "Expected error {:?} for {:?}, got:\n{:#?}",
            expected, source, errors
        );
    }
}

#[cfg(test)]
fn read_demo_file(filename: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join(filename);

    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}
