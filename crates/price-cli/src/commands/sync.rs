//! Sync command implementation
//!
//! Loads the configuration, runs one synchronization against the files under
//! the repository root, and prints a summary plus machine-readable lines.

use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use price_core::{
    FileStore, SyncConfig, SyncOptions, SyncReport, Synchronizer, WriteOutcome, source_for,
};

use crate::error::Result;

/// Run the sync command
///
/// Always exits 0 on success; `CHANGED=` tells CI whether files moved.
pub fn run_sync(root: &Path, config_path: &Path, dry_run: bool, json: bool) -> Result<i32> {
    let config = SyncConfig::load(config_path)?;
    tracing::debug!("Loaded config from {}", config_path.display());

    let source = source_for(
        &config.upstream_url,
        root,
        Duration::from_secs(config.fetch_timeout_secs),
    )?;
    let store = FileStore::from_config(&config, root);
    let output_path = store.output_path().to_path_buf();

    if !json {
        println!(
            "{} Syncing {} from {}{}",
            "=>".blue().bold(),
            output_path.display().to_string().cyan(),
            config.upstream_url,
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let mut synchronizer = Synchronizer::new(config, source, store);
    let report = synchronizer.run(&SyncOptions { dry_run })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
        println!("CHANGED={}", report.changed());
        println!("HASH={}", report.digest);
    }

    Ok(0)
}

fn print_summary(report: &SyncReport) {
    let merge = &report.merge;
    println!(
        "   {} matching upstream models: {} added, {} updated, {} unchanged",
        merge.total_upstream, merge.added, merge.updated, merge.unchanged
    );

    for alias in &report.aliases_applied {
        println!("   {} alias {}", "+".green(), alias.cyan());
    }
    for skipped in &report.aliases_skipped {
        println!(
            "   {} alias {} skipped: source {} not found",
            "!".yellow(),
            skipped.alias.cyan(),
            skipped.source.yellow()
        );
    }
    if !report.auto_filled.is_empty() {
        println!(
            "   {} filled 1-hour cache pricing for {} models",
            "+".green(),
            report.auto_filled.len()
        );
    }
    if report.custom_models > 0 {
        println!("   {} {} custom models", "+".green(), report.custom_models);
    }

    println!(
        "   {} models total (was {})",
        report.total_models, report.prior_models
    );

    match report.outcome {
        WriteOutcome::Unchanged => {
            println!("{} No changes detected.", "OK".green().bold());
        }
        WriteOutcome::Updated => {
            println!("{} Output updated.", "OK".green().bold());
        }
        WriteOutcome::WouldUpdate => {
            println!(
                "{} Output would change. Run without {} to apply.",
                "DRY-RUN".yellow().bold(),
                "--dry-run".cyan()
            );
        }
    }
}
