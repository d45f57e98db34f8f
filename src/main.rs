//! Bitsummary CLI - Model Summaries
//!
//! Command-line interface for rendering model summaries.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use bitsummary::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Bitsummary v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd, cli.quiet),
        None => {
            println!("Bitsummary v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, quiet: bool) -> anyhow::Result<()> {
    match cmd {
        Commands::Render { records, report } => commands::render(&records, &report, quiet)
            .with_context(|| format!("Failed to summarize {}", records.display())),
        Commands::Tree { tree, report } => commands::render_tree(&tree, &report, quiet)
            .with_context(|| format!("Failed to summarize module tree {}", tree.display())),
    }
}
