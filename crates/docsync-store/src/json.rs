//! JSON file backed version store
//!
//! The collection lives in one JSON Lines journal (see [`crate::journal`]).
//! Opening the store takes an exclusive advisory lock on `<file>.lock`,
//! held until the store is dropped, so two processes never interleave
//! writes to the same file. Each `append` and `delete_chain` writes one
//! line and syncs it; the in-memory collection only changes once the line
//! is on disk. Journals carrying deletes or an interrupted final line are
//! compacted on open through write-to-temp-then-rename.

use fs2::FileExt;
use std::borrow::Cow;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::collection::Collection;
use crate::journal::{self, Entry};
use crate::model::{Document, FileVersion};
use crate::store::{VersionStore, check_project};
use crate::{Error, Result};

/// A version store persisted as a JSON Lines document journal.
#[derive(Debug)]
pub struct JsonStore {
    project: String,
    path: PathBuf,
    collection: Collection,
    journal: File,
    /// Length of the journal after the last complete entry.
    journal_len: u64,
    lock: File,
}

impl JsonStore {
    /// Open (or create) the store file at `path` for `project`.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] if the parent directory is missing or the
    ///   file cannot be read or parsed
    /// - [`Error::Locked`] if another process holds the store
    pub fn open(path: impl Into<PathBuf>, project: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let project = project.into();
        let connection_error = |message: String| Error::Connection {
            target: path.display().to_string(),
            message,
        };

        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if !parent.is_dir() {
            return Err(connection_error(format!(
                "directory {} does not exist",
                parent.display()
            )));
        }

        let lock_file = lock_path(&path);
        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_file)
            .map_err(|e| connection_error(format!("cannot open lock file: {}", e)))?;
        lock.try_lock_exclusive()
            .map_err(|_| Error::Locked { path: path.clone() })?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(connection_error(format!("cannot read store file: {}", e))),
        };
        let replay = journal::replay(&content)
            .map_err(|e| connection_error(format!("unreadable store file: {}", e)))?;

        if content.is_empty() || replay.needs_compaction() {
            let bytes = journal::snapshot(&replay.collection)?;
            docsync_fs::io::write_atomic(&path, &bytes)?;
            tracing::debug!(
                path = %path.display(),
                deletes = replay.deletes,
                unterminated = replay.unterminated,
                "Rewrote store journal"
            );
        }

        let journal = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| connection_error(format!("cannot open store file: {}", e)))?;
        let journal_len = journal
            .metadata()
            .map_err(|e| connection_error(format!("cannot stat store file: {}", e)))?
            .len();
        let collection = replay.collection;

        tracing::debug!(
            path = %path.display(),
            project = %project,
            documents = collection.len(),
            "Opened JSON store"
        );

        Ok(Self {
            project,
            path,
            collection,
            journal,
            journal_len,
            lock,
        })
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one encoded entry and sync it. A failed write is cut back off
    /// the file so the next entry starts on a line boundary.
    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        let written = self
            .journal
            .write_all(line)
            .and_then(|()| self.journal.sync_data());
        if let Err(e) = written {
            if let Err(trim) = self.journal.set_len(self.journal_len) {
                tracing::warn!(path = %self.path.display(), error = %trim, "Failed to trim partial journal entry");
            }
            return Err(docsync_fs::Error::io(&self.path, e).into());
        }
        self.journal_len += line.len() as u64;
        Ok(())
    }
}

/// Lock file guarding the store file at `path`.
pub fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

impl Drop for JsonStore {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.lock) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to release store lock");
        } else {
            tracing::debug!(path = %self.path.display(), "Released store lock");
        }
    }
}

impl VersionStore for JsonStore {
    fn project(&self) -> &str {
        &self.project
    }

    fn latest(&self, path: &str) -> Result<Option<FileVersion>> {
        self.collection
            .latest(&self.project, path)
            .map(Document::decode)
            .transpose()
    }

    fn all_latest(&self) -> Result<Vec<FileVersion>> {
        self.collection
            .all_latest(&self.project)
            .into_iter()
            .map(Document::decode)
            .collect()
    }

    fn append(&mut self, record: FileVersion) -> Result<()> {
        check_project(&self.project, &record)?;
        let document = Document::from(&record);
        let line = Entry::Append(Cow::Borrowed(&document)).to_line()?;
        let (path, version) = (document.path.clone(), document.version);

        self.collection.insert(document)?;
        if let Err(e) = self.write_line(&line) {
            self.collection.remove_version(&self.project, &path, version);
            return Err(e);
        }
        Ok(())
    }

    fn delete_chain(&mut self, path: &str) -> Result<u64> {
        let line = Entry::Delete {
            project: Cow::Borrowed(self.project.as_str()),
            path: Cow::Borrowed(path),
        }
        .to_line()?;
        let Some(chain) = self.collection.take_chain(&self.project, path) else {
            return Ok(0);
        };

        if let Err(e) = self.write_line(&line) {
            self.collection.restore_chain(chain);
            return Err(e);
        }
        Ok(chain.len() as u64)
    }

    fn all_records(&self) -> Result<Vec<FileVersion>> {
        self.collection
            .records(&self.project)
            .into_iter()
            .map(Document::decode)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_file_sits_next_to_store() {
        assert_eq!(
            lock_path(Path::new("/srv/store.json")),
            PathBuf::from("/srv/store.json.lock")
        );
    }
}
