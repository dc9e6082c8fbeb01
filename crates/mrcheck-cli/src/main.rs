//! mrcheck CLI
//!
//! Command-line interface for verifying stored declarations

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod config;

/// Exit code for a verification that ran and found differences
const EXIT_MISMATCH: u8 = 1;
/// Exit code for configuration, storage or decode failures
const EXIT_ERROR: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mrcheck")]
#[command(about = "mrcheck - verify stored object declarations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Verify a declaration against expected manifests
    Verify(commands::verify::VerifyArgs),
    /// Seed a filesystem store
    Store(commands::store::StoreArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Verify(args) => commands::verify::execute(args),
        Commands::Store(args) => commands::store::execute(args).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_MISMATCH),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
