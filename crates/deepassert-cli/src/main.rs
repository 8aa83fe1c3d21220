//! deepassert CLI
//!
//! Command-line interface for comparing structured documents

use clap::{Parser, Subcommand, ValueEnum};
use deepassert_core::logging_facility::{init, Profile};

mod commands;

use commands::compare::Outcome;

#[derive(Debug, Parser)]
#[command(name = "deepassert")]
#[command(about = "deepassert - Deep structural comparison with numeric tolerance", long_about = None)]
struct Cli {
    /// Emit structured logs on stderr in the given format
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two JSON or YAML documents
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log_format {
        Some(LogFormat::Human) => init(Profile::Development),
        Some(LogFormat::Json) => init(Profile::Production),
        None => {}
    }

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    match result {
        Ok(Outcome::Match) => {}
        Ok(Outcome::Mismatch) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
