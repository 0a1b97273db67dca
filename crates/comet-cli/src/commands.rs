//! File commands: `lex`, `parse` and `check`

use comet_error::{DiagnosticRenderer, Diagnostics, SourceCache};
use comet_lexer::{tokenize, Lexer};
use comet_parser::{Parser, Program};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// A named source text
pub struct SourceInput {
    pub name: String,
    pub text: String,
}

impl SourceInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn read(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

struct Parsed {
    cache: SourceCache,
    program: Program,
    diagnostics: Diagnostics,
}

fn parse_input(source: &SourceInput) -> Parsed {
    let mut cache = SourceCache::new();
    let file_id = cache.add(source.name.clone(), source.text.clone());

    let mut parser = Parser::new(Lexer::with_file_id(&source.text, file_id));
    let program = parser.parse_program();
    tracing::info!(file = %source.name, statements = program.statements.len(), "parsed");

    Parsed {
        cache,
        program,
        diagnostics: parser.take_diagnostics(),
    }
}

fn report<E: Write>(parsed: &Parsed, err: &mut E, colors: bool) -> io::Result<()> {
    let mut renderer = DiagnosticRenderer::new(&parsed.cache);
    if !colors {
        renderer = renderer.without_colors();
    }

    writeln!(err, "{}", parsed.diagnostics.render_with(&renderer))?;
    writeln!(err, "{} error(s) found", parsed.diagnostics.len())
}

/// Prints one token per line with its position
pub fn lex<W: Write>(source: &SourceInput, out: &mut W) -> io::Result<()> {
    let tokens = tokenize(&source.text, 0);

    for token in &tokens {
        writeln!(
            out,
            "{:>4}:{:<3}  {:<10} {:?}",
            token.span.start.line,
            token.span.start.column,
            token.kind.name(),
            token.literal
        )?;
    }

    writeln!(out, "\nTotal: {} tokens", tokens.len())
}

/// Prints the numbered statements, then any diagnostics. Returns whether the
/// source parsed cleanly.
pub fn parse<W: Write, E: Write>(source: &SourceInput, out: &mut W, err: &mut E, colors: bool) -> io::Result<bool> {
    let parsed = parse_input(source);

    writeln!(out, "AST ({} statements):\n", parsed.program.statements.len())?;
    for (i, stmt) in parsed.program.statements.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, stmt)?;
    }

    if parsed.diagnostics.has_errors() {
        report(&parsed, err, colors)?;
        return Ok(false);
    }
    Ok(true)
}

/// Reports diagnostics only. Returns whether the source parsed cleanly.
pub fn check<W: Write, E: Write>(source: &SourceInput, out: &mut W, err: &mut E, colors: bool) -> io::Result<bool> {
    let parsed = parse_input(source);

    if parsed.diagnostics.has_errors() {
        report(&parsed, err, colors)?;
        return Ok(false);
    }

    writeln!(
        out,
        "{}: no errors ({} statements)",
        source.name,
        parsed.program.statements.len()
    )?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn source_file(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    fn run_check(text: &str) -> (bool, String, String) {
        let file = source_file(text);
        let source = SourceInput::read(file.path()).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = check(&source, &mut out, &mut err, false).unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_lex_file() {
        let file = source_file("let five = 5;\n!=");
        let source = SourceInput::read(file.path()).unwrap();
        let mut out = Vec::new();
        lex(&source, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "   1:1    LET        \"let\"");
        assert_eq!(lines[3], "   1:12   INT        \"5\"");
        assert_eq!(lines[4], "   1:13   SEMICOLON  \";\"");
        assert_eq!(lines[5], "   2:1    NOT_EQ     \"!=\"");
        assert_eq!(lines[6], "   2:3    EOF        \"\"");
        assert!(out.ends_with("Total: 7 tokens\n"));
    }

    #[test]
    fn test_parse_file() {
        let file = source_file("let x = 1 + 2 * 3;\nreturn -x");
        let source = SourceInput::read(file.path()).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert!(parse(&source, &mut out, &mut err, false).unwrap());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("1. let x = (1 + (2 * 3));"));
        assert!(out.contains("2. return (-x);"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_check_clean_file() {
        let (ok, out, err) = run_check("let a = true == !false;");
        assert!(ok);
        assert!(out.ends_with(": no errors (1 statements)\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_check_reports_errors() {
        let (ok, out, err) = run_check("let x 5;\nlet = 10;");
        assert!(!ok);
        assert!(out.is_empty());
        assert!(err.contains("error[EP001]: expected next token to be ASSIGN, got INT instead"));
        assert!(err.contains("error[EP002]: no prefix parse function for ASSIGN found"));
        assert!(err.contains("1 | let x 5;"));
        assert!(err.contains("2 | let = 10;"));
        assert!(err.contains("3 error(s) found"));
        assert!(!err.contains('\x1b'));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceInput::read(&dir.path().join("missing.cm"));
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::NotFound));
    }
}
