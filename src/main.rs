//! Unified adlist CLI.
//!
//! This binary currently exposes one subcommand:
//! - `adlist merge` - Fetch, normalize and merge the configured rule lists

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Adlist unified CLI.
#[derive(Parser)]
#[command(
    name = "adlist",
    version,
    about = "Aggregates ad-blocking rule lists into one priority-ordered file",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, normalize and merge the configured rule lists.
    #[command(name = "merge", alias = "run")]
    Merge(adlist_cli::MergeArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge(args) => adlist_cli::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
