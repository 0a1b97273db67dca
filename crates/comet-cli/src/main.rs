//! Comet command line

mod commands;
mod repl;

use clap::{Parser, Subcommand};
use commands::SourceInput;
use repl::Mode;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "comet")]
#[command(author = "Guilherme Mendes")]
#[command(version = "0.1.0")]
#[command(about = "Comet language front end", long_about = None)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv parser trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disables colors in diagnostics
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Starts the interactive shell (default)
    Repl {
        /// What to print for each line
        #[arg(short, long, value_enum, default_value_t = Mode::Tokens)]
        mode: Mode,
    },

    /// Shows file tokens
    Lex {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Shows the parsed statements of a file
    Parse {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Checks a file for syntax errors
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let colors = !cli.no_color;
    let command = cli.command.unwrap_or(Commands::Repl { mode: Mode::Tokens });

    let result = match command {
        Commands::Repl { mode } => {
            let user = std::env::var("USER").unwrap_or_else(|_| "there".to_string());
            println!("Hello {}! This is the Comet programming language!", user);
            println!("Feel free to type in commands");

            let stdin = io::stdin();
            repl::start(stdin.lock(), io::stdout(), mode).map(|()| true)
        }
        Commands::Lex { input } => {
            read(&input).and_then(|source| commands::lex(&source, &mut io::stdout()).map(|()| true))
        }
        Commands::Parse { input } => read(&input)
            .and_then(|source| commands::parse(&source, &mut io::stdout(), &mut io::stderr(), colors)),
        Commands::Check { input } => read(&input)
            .and_then(|source| commands::check(&source, &mut io::stdout(), &mut io::stderr(), colors)),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> io::Result<SourceInput> {
    SourceInput::read(path).map_err(|e| io::Error::new(e.kind(), format!("reading {}: {}", path.display(), e)))
}
