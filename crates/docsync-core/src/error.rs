//! Error types for docsync-core

use std::path::PathBuf;

/// Result type for docsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in docsync-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config file exists but cannot be parsed
    #[error("Invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A required setting was not provided by any source
    #[error("Missing configuration value '{key}' (set it in .docsync.toml or {env})")]
    ConfigMissing { key: String, env: String },

    /// Failure while syncing one file; aborts the whole command
    #[error("Error syncing {path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<Error>,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from docsync-fs
    #[error(transparent)]
    Fs(#[from] docsync_fs::Error),

    /// Store error from docsync-store
    #[error(transparent)]
    Store(#[from] docsync_store::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Tag `source` with the relative path of the file being synced.
    pub fn file(path: impl Into<String>, source: impl Into<Error>) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(source.into()),
        }
    }

    /// Whether the error came from establishing the store connection.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Store(e) => e.is_connection(),
            Self::File { source, .. } => source.is_connection(),
            _ => false,
        }
    }
}
