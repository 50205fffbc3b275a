//! List command implementation

use colored::Colorize;

use docsync_core::{SyncConfig, SyncEngine};

use super::{RULE, done};
use crate::error::Result;

/// Run the list command
///
/// Prints the latest version of every stored file, sorted by path.
pub fn run_list(config: &SyncConfig) -> Result<()> {
    let engine = SyncEngine::connect(config)?;

    println!("Files for project: {}", config.project.cyan());
    println!("{}", RULE);

    let report = engine.list()?;
    if report.is_empty() {
        println!("No files found for project: {}", config.project);
        return Ok(());
    }

    for entry in &report.entries {
        println!("{}", entry.path.bold());
        println!(
            "  Version: {} | Size: {} | Type: {} | Updated: {}",
            entry.version,
            entry.display_size(),
            entry.kind,
            entry.display_updated_at()
        );
    }

    println!();
    println!("{} Total files: {}", done(), report.len());

    Ok(())
}
