//! Model Price Sync CLI
//!
//! Keeps a curated model pricing file in step with the upstream dataset.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let root = commands::resolve_root(&cli.repo_root)?;
    let config_path = root.join(&cli.config);

    match cli.command.unwrap_or_default() {
        Commands::Sync { dry_run, json } => commands::run_sync(&root, &config_path, dry_run, json),
        Commands::Check { json } => commands::run_check(&root, &config_path, json),
    }
}
