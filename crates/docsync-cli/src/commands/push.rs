//! Push command implementation

use colored::Colorize;

use docsync_core::{SyncConfig, SyncEngine};

use super::{done, print_event};
use crate::error::{CliError, Result};

/// Run the push command
///
/// Stores a new version of every changed, non-ignored file under the root.
pub fn run_push(config: &SyncConfig) -> Result<()> {
    if !config.root.is_dir() {
        return Err(CliError::user(format!(
            "Root path is not a directory: {}",
            config.root.display()
        )));
    }

    let mut engine = SyncEngine::connect(config)?;

    println!("Pushing files from: {}", config.root.display().to_string().cyan());
    println!("Project: {}", config.project.cyan());
    let rule_count = engine.matcher().pattern_count();
    if rule_count > 0 {
        println!("Loaded {} {} patterns", rule_count, config.ignore_file);
    }
    println!();

    let report = engine.push_with(|event| print_event(event, false))?;

    println!();
    println!(
        "{} Push complete: {} pushed, {} skipped, {} ignored",
        done(),
        report.pushed.len(),
        report.skipped.len(),
        report.ignored
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_test_utils::TestTree;
    use tempfile::TempDir;

    #[test]
    fn push_writes_store_file() {
        let tree = TestTree::new();
        tree.write("a.txt", "alpha");
        let store_dir = TempDir::new().unwrap();
        let store_path = store_dir.path().join("store.json");
        let config = SyncConfig::new(store_path.display().to_string(), "proj", tree.root());

        run_push(&config).unwrap();

        assert!(store_path.exists());
    }

    #[test]
    fn push_rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let config = SyncConfig::new("memory:", "proj", dir.path().join("missing"));

        let err = run_push(&config).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
    }
}
