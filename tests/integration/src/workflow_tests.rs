//! Workflow tests
//!
//! End-to-end scenarios across the workspace: configuration is resolved the
//! way the binary resolves it, and two machines share one JSON file store.

use docsync_core::{ConfigResolver, SyncConfig, SyncEngine};
use docsync_store::{Collection, JsonStore, VersionStore, journal};
use docsync_test_utils::TestTree;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// One shared store plus the working trees of two machines.
struct Scenario {
    store_dir: TempDir,
    config_dir: TempDir,
    laptop: TestTree,
    desktop: TestTree,
}

impl Scenario {
    fn new() -> Self {
        Self {
            store_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
            laptop: TestTree::new(),
            desktop: TestTree::new(),
        }
    }

    fn store_path(&self) -> PathBuf {
        self.store_dir.path().join("docsync.json")
    }

    /// Resolve config for `root` the way the binary does, with only the
    /// connection and project coming from the environment.
    fn config(&self, root: &Path) -> SyncConfig {
        ConfigResolver::new(root)
            .with_global_config_dir(self.config_dir.path())
            .with_env([
                ("DOCSYNC_CONNECTION", format!("file://{}", self.store_path().display())),
                ("DOCSYNC_PROJECT", "notes".to_string()),
            ])
            .resolve()
            .unwrap()
    }

    fn engine(&self, root: &Path) -> SyncEngine {
        SyncEngine::connect(&self.config(root)).unwrap()
    }

    fn read_collection(&self) -> Collection {
        let text = std::fs::read_to_string(self.store_path()).unwrap();
        journal::replay(&text).unwrap().collection
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_edit_on_one_machine_reaches_the_other() {
    let s = Scenario::new();
    s.laptop
        .write("todo.md", "- buy milk\n")
        .write("journal/2024-01-01.md", "New year\n");

    s.engine(s.laptop.root()).push().unwrap();
    s.engine(s.desktop.root()).pull().unwrap();
    s.desktop.assert_content("todo.md", "- buy milk\n");
    s.desktop.assert_content("journal/2024-01-01.md", "New year\n");

    s.desktop.write("todo.md", "- buy milk\n- call mom\n");
    let report = s.engine(s.desktop.root()).push().unwrap();
    assert_eq!(report.pushed.len(), 1);
    assert_eq!(report.pushed[0].version, 2);

    let report = s.engine(s.laptop.root()).pull().unwrap();
    assert_eq!(report.pulled.len(), 1);
    assert_eq!(report.skipped, vec!["journal/2024-01-01.md".to_string()]);
    s.laptop.assert_content("todo.md", "- buy milk\n- call mom\n");
}

#[test]
fn test_ignore_file_from_project_config() {
    let s = Scenario::new();
    s.laptop
        .write(".docsync.toml", "ignore_file = \".notesignore\"\n")
        .write(".notesignore", "drafts/\n/scratch.md\nnotes/*.tmp\n")
        .write("drafts/idea.md", "half-baked")
        .write("scratch.md", "tmp")
        .write("sub/scratch.md", "tmp")
        .write("notes/a.tmp", "tmp")
        .write("notes/deep/b.tmp", "kept")
        .write("final.md", "done");

    let config = s.config(s.laptop.root());
    assert_eq!(config.ignore_file, ".notesignore");

    let mut engine = SyncEngine::connect(&config).unwrap();
    let report = engine.push().unwrap();
    let mut pushed: Vec<&str> = report.pushed.iter().map(|f| f.path.as_str()).collect();
    pushed.sort();

    assert_eq!(
        pushed,
        vec![".docsync.toml", ".notesignore", "final.md", "notes/deep/b.tmp"]
    );
    assert_eq!(report.ignored, 4);
}

#[test]
fn test_clean_then_list() {
    let s = Scenario::new();
    s.laptop
        .write("app.py", "print('hi')")
        .write("build/lib/app.py", "print('hi')");

    // Built-in exclusions keep build/ out of a push, so seed it directly.
    {
        let mut store = JsonStore::open(s.store_path(), "notes").unwrap();
        for version in 1..=2 {
            let record = docsync_store::FileVersion::new(
                "notes",
                "build/lib/app.py",
                version,
                format!("v{version}").into_bytes(),
                false,
            );
            store.append(record).unwrap();
        }
    }
    s.engine(s.laptop.root()).push().unwrap();

    let mut engine = s.engine(s.laptop.root());
    let report = engine.clean().unwrap();
    assert_eq!(report.total, 2);

    let listed: Vec<String> = engine
        .list()
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert_eq!(listed, vec!["app.py".to_string()]);
    s.laptop.assert_file_exists("build/lib/app.py");
}

#[test]
fn test_projects_share_a_store_without_mixing() {
    let s = Scenario::new();
    s.laptop.write("notes.md", "mine");

    s.engine(s.laptop.root()).push().unwrap();

    let other = SyncConfig::new(s.store_path().display().to_string(), "other", s.desktop.root());
    let mut engine = SyncEngine::connect(&other).unwrap();
    let report = engine.pull().unwrap();

    assert!(report.empty_store);
    s.desktop.assert_file_not_exists("notes.md");
}

#[test]
fn test_store_file_layout_on_disk() {
    let s = Scenario::new();
    s.laptop.write("a.txt", "hello");
    s.engine(s.laptop.root()).push().unwrap();

    let text = std::fs::read_to_string(s.store_path()).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["header"]["format"], 1);
    assert_eq!(lines[1]["append"]["project"], "notes");

    let collection = s.read_collection();
    let document = collection.latest("notes", "a.txt").unwrap();
    assert_eq!(document.version, 1);
    assert_eq!(document.content, "aGVsbG8=");
    assert_eq!(
        document.hash,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_second_connection_is_refused() {
    let s = Scenario::new();
    s.laptop.write("a.txt", "alpha");
    s.engine(s.laptop.root()).push().unwrap();

    // A second connection is refused while the first is held.
    let held = s.engine(s.laptop.root());
    let err = SyncEngine::connect(&s.config(s.laptop.root())).err().unwrap();
    assert!(err.is_connection());
    drop(held);

    assert_eq!(s.read_collection().len(), 1);
}
