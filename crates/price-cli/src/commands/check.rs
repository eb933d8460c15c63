//! Check command implementation

use std::path::Path;

use colored::Colorize;

use price_core::{CheckStatus, FileStore, SyncConfig, check};

use crate::error::Result;

/// Run the check command
///
/// Returns exit code 0 when the output matches its recorded hash, 1 otherwise.
pub fn run_check(root: &Path, config_path: &Path, json: bool) -> Result<i32> {
    let config = SyncConfig::load(config_path)?;
    let store = FileStore::from_config(&config, root);

    if !json {
        println!(
            "{} Checking {} against {}...",
            "=>".blue().bold(),
            store.output_path().display().to_string().cyan(),
            store.hash_path().display().to_string().cyan()
        );
    }

    let report = check(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.is_healthy() { 0 } else { 1 });
    }

    match report.status {
        CheckStatus::Healthy => {
            println!("{} Output matches its recorded hash.", "OK".green().bold());
        }
        CheckStatus::Missing => {
            println!("{} Output or hash file is missing:", "MISSING".yellow().bold());
            for msg in &report.messages {
                println!("   {} {}", "-".yellow(), msg);
            }
            println!();
            println!("Run {} to regenerate.", "price-sync sync".cyan());
        }
        CheckStatus::Drifted => {
            println!("{} Output has drifted:", "DRIFTED".red().bold());
            for msg in &report.messages {
                println!("   {} {}", "!".red(), msg);
            }
            println!();
            println!(
                "Remove {} and run {} to regenerate.",
                store.hash_path().display().to_string().cyan(),
                "price-sync sync".cyan()
            );
        }
    }

    Ok(if report.is_healthy() { 0 } else { 1 })
}
