//! Reports returned by sync operations

use chrono::{DateTime, Utc};

use docsync_store::{FileKind, FileVersion};

use super::format::{TIMESTAMP_FORMAT, format_size};

/// Per-file progress emitted while a push or pull runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEvent<'a> {
    /// Stored as a new version (push) or written locally (pull)
    Synced { path: &'a str, version: u64 },
    /// Content already matched, nothing written
    Unchanged { path: &'a str },
}

/// A file written to the store or the local tree, with the version involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedFile {
    pub path: String,
    pub version: u64,
}

/// Outcome of a push
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushReport {
    /// Files stored as a new version
    pub pushed: Vec<SyncedFile>,
    /// Files whose content matched the latest stored version
    pub skipped: Vec<String>,
    /// Number of files excluded by ignore rules
    pub ignored: usize,
    /// Number of user ignore rules in effect
    pub rule_count: usize,
}

/// Outcome of a pull
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullReport {
    /// Files written locally
    pub pulled: Vec<SyncedFile>,
    /// Files whose local content already matched the store
    pub skipped: Vec<String>,
    /// The project had no stored files at all
    pub empty_store: bool,
}

/// One line of list output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub path: String,
    pub version: u64,
    pub size: u64,
    pub kind: FileKind,
    pub updated_at: DateTime<Utc>,
}

impl ListEntry {
    /// Size with base-1024 units, e.g. `1.5 KB`
    pub fn display_size(&self) -> String {
        format_size(self.size)
    }

    /// Update time as `YYYY-MM-DD HH:MM:SS` (UTC)
    pub fn display_updated_at(&self) -> String {
        self.updated_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl From<&FileVersion> for ListEntry {
    fn from(record: &FileVersion) -> Self {
        Self {
            path: record.path.clone(),
            version: record.version,
            size: record.size,
            kind: record.kind(),
            updated_at: record.updated_at,
        }
    }
}

/// Outcome of a list, sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    pub entries: Vec<ListEntry>,
}

impl ListReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A version chain removed by clean
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedChain {
    pub path: String,
    /// Number of version records deleted
    pub versions: u64,
}

/// Outcome of a clean
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<RemovedChain>,
    /// Total documents deleted across all chains
    pub total: u64,
}
