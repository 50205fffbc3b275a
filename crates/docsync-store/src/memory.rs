//! In-memory version store

use crate::collection::Collection;
use crate::model::{Document, FileVersion};
use crate::store::{VersionStore, check_project};
use crate::Result;

/// A version store held entirely in process memory.
///
/// Suitable for tests and throwaway runs; nothing survives the process.
///
/// # Example
///
/// ```rust
/// use docsync_store::{FileVersion, MemoryStore, VersionStore};
///
/// let mut store = MemoryStore::new("demo");
/// store.append(FileVersion::new("demo", "a.txt", 1, b"hi".to_vec(), false)).unwrap();
/// assert_eq!(store.latest("a.txt").unwrap().unwrap().version, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    project: String,
    collection: Collection,
}

impl MemoryStore {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            collection: Collection::new(),
        }
    }
}

impl VersionStore for MemoryStore {
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
        self.collection.insert(Document::from(&record))
    }

    fn delete_chain(&mut self, path: &str) -> Result<u64> {
        Ok(self.collection.delete_chain(&self.project, path))
    }

    fn all_records(&self) -> Result<Vec<FileVersion>> {
        self.collection
            .records(&self.project)
            .into_iter()
            .map(Document::decode)
            .collect()
    }
}
