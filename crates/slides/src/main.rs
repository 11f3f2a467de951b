//! Slides CLI - Markdown slide decks.
//!
//! Provides commands for:
//! - `build`: Compile a markdown deck to JSON or a standalone HTML page
//! - `export`: Export a deck as PDF
//! - `watch`: Rebuild the HTML deck whenever the markdown changes
//! - `doc`: Manage saved documents

mod commands;
mod deck;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, DocArgs, ExportArgs, WatchArgs};
use output::Output;

/// Slides - Markdown slide decks.
#[derive(Parser)]
#[command(name = "slides", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover slides.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output (INFO level logging).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a markdown deck.
    Build(BuildArgs),
    /// Export a markdown deck as PDF.
    Export(ExportArgs),
    /// Rebuild an HTML deck on every change.
    Watch(WatchArgs),
    /// Saved document commands.
    Doc(DocArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(args) => args.execute(config),
        Commands::Export(args) => args.execute(config),
        Commands::Watch(args) => args.execute(config),
        Commands::Doc(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
