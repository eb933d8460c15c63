//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Model Price Sync - Keep a curated model pricing file in step with upstream
#[derive(Parser, Debug)]
#[command(name = "price-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON, TOML or YAML), relative to the repository root
    #[arg(short, long, global = true, default_value = "config.json", env = "PRICE_SYNC_CONFIG")]
    pub config: PathBuf,

    /// Directory that relative paths in the configuration resolve against
    #[arg(long, global = true, default_value = ".")]
    pub repo_root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run (defaults to `sync`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Fetch upstream pricing and update the output file if it changed
    ///
    /// Prints `CHANGED=<true|false>` and `HASH=<hex>` for CI pipelines.
    ///
    /// Examples:
    ///   price-sync sync               # Update data files
    ///   price-sync sync --dry-run     # Report without writing
    ///   price-sync --config sync.toml # Use a TOML config
    Sync {
        /// Compute the result without writing any files
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Verify the output file against its recorded hash
    ///
    /// Exits non-zero when the output is missing or has drifted.
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Sync {
            dry_run: false,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args_defaults() {
        let cli = Cli::parse_from(["price-sync"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert_eq!(cli.repo_root, PathBuf::from("."));
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_sync_dry_run() {
        let cli = Cli::parse_from(["price-sync", "sync", "--dry-run"]);
        assert_eq!(
            cli.command,
            Some(Commands::Sync {
                dry_run: true,
                json: false
            })
        );
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "price-sync",
            "check",
            "--json",
            "--config",
            "sync.toml",
            "--repo-root",
            "/tmp/repo",
            "-v",
        ]);
        assert_eq!(cli.command, Some(Commands::Check { json: true }));
        assert_eq!(cli.config, PathBuf::from("sync.toml"));
        assert_eq!(cli.repo_root, PathBuf::from("/tmp/repo"));
        assert!(cli.verbose);
    }
}
