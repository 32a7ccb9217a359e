//! Command-line interface for the TSD analyzer.

mod commands;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "tsd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default tsd.toml in the current directory
    Init {
        /// Project name; defaults to the directory name
        name: Option<String>,
    },

    /// Merge AST documents and report every validation problem
    #[command(visible_alias = "c")]
    Check {
        /// AST documents to merge in order; defaults to the configured sources
        files: Vec<PathBuf>,
    },

    /// Merge AST documents and print the evaluator-facing facts as JSON
    Facts {
        /// AST documents to merge in order; defaults to the configured sources
        files: Vec<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { name } => commands::init::execute(name.as_deref()),
        Commands::Check { files } => commands::check::execute(&files),
        Commands::Facts { files } => commands::facts::execute(&files),
    }
}
