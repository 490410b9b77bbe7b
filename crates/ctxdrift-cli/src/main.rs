//! ctxdrift CLI
//!
//! Command-line interface for comparing context snapshots

use clap::{Parser, Subcommand};
use ctxdrift_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ctxdrift")]
#[command(about = "ctxdrift - Context snapshot drift detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a baseline context directory against the current one
    Compare(commands::compare::CompareArgs),
    /// Print a context directory's index as JSON
    Index(commands::index::IndexArgs),
    /// Print one folder's bundles as JSON
    Bundle(commands::bundle::BundleArgs),
}

fn main() {
    init(Profile::Development);
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Index(args) => commands::index::execute(args),
        Commands::Bundle(args) => commands::bundle::execute(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
