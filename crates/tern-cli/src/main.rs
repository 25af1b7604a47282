#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::cast_possible_truncation)]

mod commands;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tern_parser::ParserOptions;

#[derive(Parser, Debug)]
#[command(name = "tern")]
#[command(author, version, about = "Parse a JavaScript subset into a JSON syntax tree", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Parse a source file and print its AST as JSON
    Parse {
        /// Source file to parse ("-" or omitted reads stdin)
        file: Option<PathBuf>,

        /// Parse this code instead of reading a file
        #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "file")]
        eval: Option<String>,

        /// Print the AST on a single line
        #[arg(long)]
        compact: bool,

        /// Maximum nesting depth of statements and expressions
        #[arg(long, value_name = "N", default_value_t = ParserOptions::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print the token stream of a source file
    Tokens {
        /// Source file to scan ("-" or omitted reads stdin)
        file: Option<PathBuf>,

        /// Scan this code instead of reading a file
        #[arg(short = 'e', long = "eval", value_name = "CODE", conflicts_with = "file")]
        eval: Option<String>,
    },

    /// Parse a built-in snippet and print its AST
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Parse {
            file,
            eval,
            compact,
            max_depth,
        } => {
            let source = commands::read_source(file.as_deref(), eval)?;
            commands::parse::run(&source, ParserOptions { max_depth }, compact)
        }
        Commands::Tokens { file, eval } => {
            let source = commands::read_source(file.as_deref(), eval)?;
            commands::tokens::run(&source)
        }
        Commands::Demo => commands::demo::run(),
    }
}
