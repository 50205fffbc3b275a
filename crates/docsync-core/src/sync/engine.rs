//! SyncEngine implementation
//!
//! The SyncEngine moves file content between a local root directory and a
//! project-scoped [`VersionStore`]. All work is sequential: each file is
//! read, hashed and written before the next one is looked at.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use docsync_fs::{IgnoreMatcher, NormalizedPath, content_hash, io, is_binary, walk_files};
use docsync_store::{ConnectionTarget, FileVersion, VersionStore, connect};

use super::clean::is_cache_artifact;
use super::report::{
    CleanReport, FileEvent, ListEntry, ListReport, PullReport, PushReport, RemovedChain, SyncedFile,
};
use crate::config::SyncConfig;
use crate::{Error, Result};

/// Engine for synchronizing a directory tree with a version store
///
/// The SyncEngine provides four operations:
/// - **push**: store a new version of every changed, non-ignored local file
/// - **pull**: write the latest version of every stored file locally
/// - **list**: report the latest version of every stored file
/// - **clean**: delete the version chains of cache and build artifacts
///
/// Any failure on an individual file aborts the operation with
/// [`Error::File`]. Records written before the failure stay in the store.
pub struct SyncEngine {
    /// Directory being synced
    root: PathBuf,
    /// Ignore rules, loaded once per engine
    matcher: IgnoreMatcher,
    /// Backend for the project's version chains
    store: Box<dyn VersionStore>,
    /// Backend files living inside the root, never pushed
    backend_files: Vec<PathBuf>,
}

impl SyncEngine {
    /// Create an engine over an already-open store.
    pub fn new(config: &SyncConfig, store: Box<dyn VersionStore>) -> Self {
        Self {
            root: config.root.clone(),
            matcher: IgnoreMatcher::load_with_file(&config.root, &config.ignore_file),
            store,
            backend_files: Vec::new(),
        }
    }

    /// Open the configured store and create an engine over it.
    ///
    /// The connection is held by the engine and released when it is dropped.
    ///
    /// # Errors
    ///
    /// Returns a store connection error before any file is touched.
    pub fn connect(config: &SyncConfig) -> Result<Self> {
        let target = config.target()?;
        let store = connect(&target, &config.project)?;
        let mut engine = Self::new(config, store);
        if let ConnectionTarget::JsonFile(path) = &target {
            engine.backend_files = backend_files(path);
        }
        Ok(engine)
    }

    /// The directory being synced
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The project all records belong to
    pub fn project(&self) -> &str {
        self.store.project()
    }

    /// The ignore rules in effect for push
    pub fn matcher(&self) -> &IgnoreMatcher {
        &self.matcher
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &dyn VersionStore {
        self.store.as_ref()
    }

    /// Give back the underlying store
    pub fn into_store(self) -> Box<dyn VersionStore> {
        self.store
    }

    /// Push every changed local file as a new version.
    ///
    /// Unchanged files (same hash as the latest stored version) never create
    /// a record. Local files are never modified and stored chains for
    /// deleted local files are left alone.
    ///
    /// # Errors
    ///
    /// Aborts on the first file that cannot be read or stored.
    pub fn push(&mut self) -> Result<PushReport> {
        self.push_with(|_| {})
    }

    /// [`SyncEngine::push`], calling `on_file` as each file is stored or
    /// found unchanged, in walk order.
    pub fn push_with(&mut self, mut on_file: impl FnMut(FileEvent<'_>)) -> Result<PushReport> {
        tracing::info!(root = %self.root.display(), project = self.project(), "Starting push");

        let mut report = PushReport {
            rule_count: self.matcher.pattern_count(),
            ..PushReport::default()
        };

        for file in walk_files(&self.root)? {
            if self.matcher.should_ignore(&file) || self.is_backend_file(&file) {
                tracing::debug!(path = %file.display(), "Ignored");
                report.ignored += 1;
                continue;
            }

            let relative = NormalizedPath::relative_to(&self.root, &file)?;
            match self
                .push_file(&file, &relative)
                .map_err(|e| Error::file(relative.as_str(), e))?
            {
                Some(version) => {
                    on_file(FileEvent::Synced {
                        path: relative.as_str(),
                        version,
                    });
                    report.pushed.push(SyncedFile {
                        path: relative.to_string(),
                        version,
                    });
                }
                None => {
                    on_file(FileEvent::Unchanged {
                        path: relative.as_str(),
                    });
                    report.skipped.push(relative.to_string());
                }
            }
        }

        tracing::info!(
            pushed = report.pushed.len(),
            skipped = report.skipped.len(),
            ignored = report.ignored,
            "Push complete"
        );
        Ok(report)
    }

    /// Store `local` if its content differs from the latest version.
    ///
    /// Returns the new version number, or `None` if unchanged.
    fn push_file(&mut self, local: &Path, relative: &NormalizedPath) -> Result<Option<u64>> {
        let content = io::read_bytes(local)?;
        let binary = is_binary(&content);
        let mut record = FileVersion::new(self.project(), relative.as_str(), 1, content, binary);

        if let Some(latest) = self.store.latest(relative.as_str())? {
            if latest.hash == record.hash {
                tracing::debug!(path = %relative, version = latest.version, "Unchanged");
                return Ok(None);
            }
            record.version = latest.version + 1;
        }

        let version = record.version;
        self.store.append(record)?;
        tracing::debug!(path = %relative, version, "Pushed");
        Ok(Some(version))
    }

    /// Write the latest stored version of every file into the root.
    ///
    /// The root is created if missing. Local files whose hash already
    /// matches are skipped. Ignore rules are not consulted and local files
    /// absent from the store are left alone.
    ///
    /// # Errors
    ///
    /// Aborts on the first file that cannot be written.
    pub fn pull(&mut self) -> Result<PullReport> {
        self.pull_with(|_| {})
    }

    /// [`SyncEngine::pull`], calling `on_file` as each file is written or
    /// found unchanged, in path order.
    pub fn pull_with(&mut self, mut on_file: impl FnMut(FileEvent<'_>)) -> Result<PullReport> {
        tracing::info!(root = %self.root.display(), project = self.project(), "Starting pull");

        fs::create_dir_all(&self.root).map_err(|e| docsync_fs::Error::io(&self.root, e))?;

        let mut records = self.store.all_latest()?;
        if records.is_empty() {
            tracing::info!(project = self.project(), "No files stored for project");
            return Ok(PullReport {
                empty_store: true,
                ..PullReport::default()
            });
        }
        records.sort_by(|a, b| a.path.cmp(&b.path));

        let mut report = PullReport::default();
        for record in &records {
            let written = self
                .pull_file(record)
                .map_err(|e| Error::file(record.path.as_str(), e))?;
            if written {
                on_file(FileEvent::Synced {
                    path: &record.path,
                    version: record.version,
                });
                report.pulled.push(SyncedFile {
                    path: record.path.clone(),
                    version: record.version,
                });
            } else {
                on_file(FileEvent::Unchanged { path: &record.path });
                report.skipped.push(record.path.clone());
            }
        }

        tracing::info!(
            pulled = report.pulled.len(),
            skipped = report.skipped.len(),
            "Pull complete"
        );
        Ok(report)
    }

    /// Write one record locally unless the local copy already matches.
    fn pull_file(&self, record: &FileVersion) -> Result<bool> {
        let local = NormalizedPath::new(&record.path).resolve_under(&self.root)?;

        if local.exists() {
            let existing = io::read_bytes(&local)?;
            if content_hash(&existing) == record.hash {
                tracing::debug!(path = %record.path, "Unchanged");
                return Ok(false);
            }
        }

        io::write_atomic(&local, &record.content)?;
        tracing::debug!(path = %record.path, version = record.version, "Pulled");
        Ok(true)
    }

    /// Report the latest version of every stored file, sorted by path.
    pub fn list(&self) -> Result<ListReport> {
        let mut entries: Vec<ListEntry> = self
            .store
            .all_latest()?
            .iter()
            .map(ListEntry::from)
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(ListReport { entries })
    }

    /// Delete every version of every stored cache or build artifact.
    ///
    /// All records are inspected, not just the latest, so chains are purged
    /// in full. The local filesystem is never touched.
    ///
    /// # Errors
    ///
    /// Aborts on the first chain that cannot be deleted.
    pub fn clean(&mut self) -> Result<CleanReport> {
        tracing::info!(project = self.project(), "Starting clean");

        let paths: BTreeSet<String> = self
            .store
            .all_records()?
            .into_iter()
            .map(|record| record.path)
            .collect();

        let mut report = CleanReport::default();
        for path in paths.into_iter().filter(|p| is_cache_artifact(p)) {
            let versions = self
                .store
                .delete_chain(&path)
                .map_err(|e| Error::file(path.as_str(), e))?;
            tracing::debug!(%path, versions, "Deleted chain");
            report.total += versions;
            report.removed.push(RemovedChain { path, versions });
        }

        tracing::info!(deleted = report.total, "Clean complete");
        Ok(report)
    }

    fn is_backend_file(&self, file: &Path) -> bool {
        if self.backend_files.is_empty() {
            return false;
        }
        fs::canonicalize(file)
            .map(|canonical| self.backend_files.contains(&canonical))
            .unwrap_or(false)
    }
}

/// Canonical paths of a JSON store's file and its lock file.
fn backend_files(store_path: &Path) -> Vec<PathBuf> {
    let parent = store_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let (Ok(dir), Some(name)) = (fs::canonicalize(parent), store_path.file_name()) else {
        return Vec::new();
    };
    let store_file = dir.join(name);
    let lock_file = docsync_store::json::lock_path(&store_file);
    vec![store_file, lock_file]
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_store::MemoryStore;
    use tempfile::TempDir;

    fn engine(root: &Path) -> SyncEngine {
        let config = SyncConfig::new("memory:", "proj", root);
        SyncEngine::new(&config, Box::new(MemoryStore::new("proj")))
    }

    #[test]
    fn backend_files_are_canonical_store_and_lock() {
        let dir = TempDir::new().unwrap();
        let files = backend_files(&dir.path().join("store.json"));
        let canonical = fs::canonicalize(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![canonical.join("store.json"), canonical.join("store.json.lock")]
        );
    }

    #[test]
    fn backend_files_empty_for_missing_parent() {
        let dir = TempDir::new().unwrap();
        assert!(backend_files(&dir.path().join("missing/store.json")).is_empty());
    }

    #[test]
    fn second_push_of_changed_file_bumps_version() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "one").unwrap();

        let mut engine = engine(dir.path());
        assert_eq!(engine.push().unwrap().pushed[0].version, 1);

        fs::write(dir.path().join("a.txt"), "two").unwrap();
        assert_eq!(engine.push().unwrap().pushed[0].version, 2);
        assert_eq!(engine.store().all_records().unwrap().len(), 2);
    }

    #[test]
    fn pull_rejects_paths_escaping_root() {
        let dir = TempDir::new().unwrap();
        let mut store = MemoryStore::new("proj");
        store
            .append(FileVersion::new("proj", "../escape.txt", 1, b"x".to_vec(), false))
            .unwrap();
        let config = SyncConfig::new("memory:", "proj", dir.path().join("root"));
        let mut engine = SyncEngine::new(&config, Box::new(store));

        let err = engine.pull().unwrap_err();
        assert!(matches!(&err, Error::File { path, .. } if path == "../escape.txt"));
        assert!(!dir.path().join("escape.txt").exists());
    }
}
