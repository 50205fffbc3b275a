//! Normalized project-relative paths

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Stored records always carry this form so that a tree pushed from one
/// platform can be pulled on another. Conversion to platform-native form
/// happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes and drops empty and `.`
    /// components.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy().replace('\\', "/");
        let leading = if path_str.starts_with('/') { "/" } else { "" };
        let cleaned: Vec<&str> = path_str
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();
        Self {
            inner: format!("{}{}", leading, cleaned.join("/")),
        }
    }

    /// Compute the path of `path` relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutsideRoot`] if `path` does not live under `root`.
    pub fn relative_to(root: &Path, path: &Path) -> Result<Self> {
        let relative = path.strip_prefix(root).map_err(|_| Error::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Ok(Self {
            inner: parts.join("/"),
        })
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Iterate over the path's components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|part| !part.is_empty())
    }

    /// Resolve this relative path beneath `root`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutsideRoot`] for absolute paths or paths containing
    /// `..`, which would place the result outside `root`.
    pub fn resolve_under(&self, root: &Path) -> Result<PathBuf> {
        if self.inner.starts_with('/') || self.components().any(|part| part == "..") {
            return Err(Error::OutsideRoot {
                path: PathBuf::from(&self.inner),
                root: root.to_path_buf(),
            });
        }
        let mut resolved = root.to_path_buf();
        for part in self.components() {
            resolved.push(part);
        }
        Ok(resolved)
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
