//! Pull command implementation

use colored::Colorize;

use docsync_core::{SyncConfig, SyncEngine};

use super::{done, print_event};
use crate::error::Result;

/// Run the pull command
///
/// Writes the latest stored version of every file under the root, creating
/// the root if needed.
pub fn run_pull(config: &SyncConfig) -> Result<()> {
    let mut engine = SyncEngine::connect(config)?;

    println!("Pulling files to: {}", config.root.display().to_string().cyan());
    println!("Project: {}", config.project.cyan());
    println!();

    let report = engine.pull_with(|event| print_event(event, true))?;

    if report.empty_store {
        println!("No files found for project: {}", config.project);
        return Ok(());
    }
    println!();
    println!(
        "{} Pull complete: {} pulled, {} skipped",
        done(),
        report.pulled.len(),
        report.skipped.len()
    );

    Ok(())
}
