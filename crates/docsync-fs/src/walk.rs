//! Local tree walk

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Error, Result};

/// Collect every regular file beneath `root`, in a stable order.
///
/// Symbolic links are not followed and are not reported. Directories that
/// hold built-in exclusions are still descended into so callers can count
/// what they skip.
///
/// # Errors
///
/// Returns [`Error::Walk`] if an entry cannot be read.
pub fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
