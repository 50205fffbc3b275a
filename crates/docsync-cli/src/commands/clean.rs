//! Clean command implementation

use colored::Colorize;

use docsync_core::{SyncConfig, SyncEngine};

use super::{RULE, done};
use crate::error::Result;

/// Run the clean command
///
/// Deletes every stored version of cache and build artifacts. Local files
/// are left alone.
pub fn run_clean(config: &SyncConfig) -> Result<()> {
    let mut engine = SyncEngine::connect(config)?;

    println!("Cleaning cache files from project: {}", config.project.cyan());
    println!("{}", RULE);

    let report = engine.clean()?;

    for chain in &report.removed {
        println!(
            "  {} Deleted: {} ({} versions)",
            done(),
            chain.path,
            chain.versions
        );
    }

    println!();
    println!(
        "{} Cleanup complete: {} documents deleted",
        done(),
        report.total
    );
    if report.removed.is_empty() {
        println!("  No cache files found in store");
    }

    Ok(())
}
