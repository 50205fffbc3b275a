//! Repository interface over a versioned document backend

use crate::Result;
use crate::model::FileVersion;

/// Project-scoped access to file version chains.
///
/// The sync engine depends only on this trait, so any backend that can
/// answer "latest version of a path" and "latest version of every path"
/// can serve as the store.
///
/// # Invariants
///
/// - `append` never replaces an existing record
/// - `latest` and `all_latest` return the highest version of a chain
/// - `delete_chain` removes every version of a path and nothing else
pub trait VersionStore {
    /// The project every operation is scoped to.
    fn project(&self) -> &str;

    /// Highest version stored for `path`, if any.
    fn latest(&self, path: &str) -> Result<Option<FileVersion>>;

    /// Highest version of every distinct path, in no particular order.
    fn all_latest(&self) -> Result<Vec<FileVersion>>;

    /// Insert a fully-formed record whose version the caller assigned.
    ///
    /// # Errors
    ///
    /// Fails if the record belongs to another project or its version
    /// already exists.
    fn append(&mut self, record: FileVersion) -> Result<()>;

    /// Remove every version of `path`, returning how many were removed.
    fn delete_chain(&mut self, path: &str) -> Result<u64>;

    /// Every version of every path.
    fn all_records(&self) -> Result<Vec<FileVersion>>;
}

pub(crate) fn check_project(store_project: &str, record: &FileVersion) -> Result<()> {
    if record.project != store_project {
        return Err(crate::Error::operation(format!(
            "record for project '{}' appended to store for project '{}'",
            record.project, store_project
        )));
    }
    Ok(())
}
