//! Integration tests for the docsync binary.
//!
//! These tests exercise the compiled binary using assert_cmd against a JSON
//! file store in a scratch directory.

use assert_cmd::Command;
use docsync_test_utils::TestTree;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch root plus a store and config dir outside of it.
struct Fixture {
    tree: TestTree,
    scratch: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let scratch = TempDir::new().unwrap();
        std::fs::create_dir(scratch.path().join("config")).unwrap();
        Self {
            tree: TestTree::new(),
            scratch,
        }
    }

    fn store_path(&self) -> PathBuf {
        self.scratch.path().join("store.json")
    }

    /// Command running in `dir` against the fixture's store.
    fn cmd_in(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("docsync"));
        cmd.current_dir(dir)
            .env("DOCSYNC_CONNECTION", self.store_path())
            .env("DOCSYNC_PROJECT", "demo")
            .env("DOCSYNC_CONFIG_DIR", self.scratch.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("DOCSYNC_ROOT")
            .env_remove("DOCSYNC_LOG");
        cmd
    }

    fn cmd(&self) -> Command {
        self.cmd_in(self.tree.root())
    }
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_lists_commands() {
    Command::new(assert_cmd::cargo::cargo_bin!("docsync"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("pull"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("clean"));
}

#[test]
fn test_version_output() {
    Command::new(assert_cmd::cargo::cargo_bin!("docsync"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docsync"));
}

#[test]
fn test_no_command_shows_help_hint() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("docsync --help"));
}

#[test]
fn test_unknown_command_fails() {
    let fixture = Fixture::new();
    fixture.cmd().arg("sync").assert().failure();
}

// ============================================================================
// Push Tests
// ============================================================================

#[test]
fn test_push_reports_markers_and_summary() {
    let fixture = Fixture::new();
    fixture.tree.write("a.txt", "alpha").write("debug.log", "log");
    fixture.tree.write(".syncignore", "*.log\n");

    fixture
        .cmd()
        .arg("push")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: demo"))
        .stdout(predicate::str::contains("Loaded 1 .syncignore patterns"))
        .stdout(predicate::str::contains("✓ a.txt"))
        .stdout(predicate::str::contains("debug.log").not())
        .stdout(predicate::str::contains(
            "Push complete: 2 pushed, 0 skipped, 1 ignored",
        ));

    fixture
        .cmd()
        .arg("push")
        .assert()
        .success()
        .stdout(predicate::str::contains("⊙ a.txt (unchanged)"))
        .stdout(predicate::str::contains("0 pushed, 2 skipped"));
}

#[test]
fn test_push_markers_follow_walk_order_before_summary() {
    let fixture = Fixture::new();
    fixture
        .tree
        .write("b.txt", "beta")
        .write("a/z.txt", "zeta")
        .write("c.txt", "gamma");

    let output = fixture.cmd().arg("push").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let at = |needle: &str| {
        stdout
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from:\n{stdout}"))
    };
    assert!(at("✓ a/z.txt") < at("✓ b.txt"));
    assert!(at("✓ b.txt") < at("✓ c.txt"));
    assert!(at("✓ c.txt") < at("Push complete"));
}

#[test]
fn test_push_without_connection_fails() {
    let fixture = Fixture::new();
    fixture.tree.write("a.txt", "alpha");

    fixture
        .cmd()
        .env_remove("DOCSYNC_CONNECTION")
        .arg("push")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("connection"));
}

#[test]
fn test_unsupported_target_fails_before_walk() {
    let fixture = Fixture::new();
    fixture.tree.write("a.txt", "alpha");

    fixture
        .cmd()
        .env("DOCSYNC_CONNECTION", "mongodb://localhost:27017")
        .arg("push")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✓").not())
        .stderr(predicate::str::contains("DOCSYNC_CONNECTION"));
}

#[test]
fn test_project_config_file_is_used() {
    let fixture = Fixture::new();
    fixture
        .tree
        .write(".docsync.toml", "project = \"from-file\"\n")
        .write("a.txt", "alpha");

    fixture
        .cmd()
        .env_remove("DOCSYNC_PROJECT")
        .arg("push")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: from-file"));
}

// ============================================================================
// Pull Tests
// ============================================================================

#[test]
fn test_pull_restores_into_new_root() {
    let fixture = Fixture::new();
    fixture.tree.write("docs/a.txt", "alpha");
    fixture.cmd().arg("push").assert().success();

    let target = TempDir::new().unwrap();
    fixture
        .cmd_in(target.path())
        .env("DOCSYNC_ROOT", "restored")
        .arg("pull")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ docs/a.txt (v1)"))
        .stdout(predicate::str::contains("Pull complete: 1 pulled, 0 skipped"));

    let restored = std::fs::read_to_string(target.path().join("restored/docs/a.txt")).unwrap();
    assert_eq!(restored, "alpha");
}

#[test]
fn test_pull_empty_project() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("pull")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found for project: demo"));
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn test_list_shows_versions_sorted() {
    let fixture = Fixture::new();
    fixture.tree.write("b.txt", "bb").write("a.bin", [0u8, 1, 2]);
    fixture.cmd().arg("push").assert().success();
    fixture.tree.write("b.txt", "bbb");
    fixture.cmd().arg("push").assert().success();

    fixture
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)a\.bin.*b\.txt").unwrap())
        .stdout(predicate::str::contains(
            "Version: 1 | Size: 3.0 B | Type: binary",
        ))
        .stdout(predicate::str::contains(
            "Version: 2 | Size: 3.0 B | Type: text",
        ))
        .stdout(predicate::str::contains("Total files: 2"));
}

#[test]
fn test_list_empty_project() {
    let fixture = Fixture::new();
    fixture
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found for project: demo"));
}

// ============================================================================
// Clean Tests
// ============================================================================

#[test]
fn test_clean_reports_deleted_chains() {
    let fixture = Fixture::new();
    fixture.tree.write("main.py", "print()");
    fixture.cmd().arg("push").assert().success();

    fixture
        .cmd()
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleanup complete: 0 documents deleted"))
        .stdout(predicate::str::contains("No cache files found in store"));
}

#[test]
fn test_locked_store_fails_with_connection_error() {
    let fixture = Fixture::new();
    let lock = std::fs::File::create(fixture.scratch.path().join("store.json.lock")).unwrap();
    fs2::FileExt::try_lock_exclusive(&lock).unwrap();

    fixture
        .cmd()
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("locked"));
}
