//! Error types for docsync-store

use std::path::PathBuf;

/// Result type for docsync-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to a version store
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend unreachable or unusable; nothing was read or written
    #[error("Failed to connect to {target}: {message}")]
    Connection { target: String, message: String },

    #[error("Unsupported connection scheme: {scheme}")]
    UnsupportedTarget { scheme: String },

    #[error("Store at {path} is locked by another process")]
    Locked { path: PathBuf },

    /// Backend rejected a query or write
    #[error("Store operation failed: {message}")]
    Operation { message: String },

    #[error("Version {version} of {path} already exists")]
    DuplicateVersion { path: String, version: u64 },

    #[error("Corrupt record for {path} (v{version}): {message}")]
    CorruptRecord {
        path: String,
        version: u64,
        message: String,
    },

    #[error(transparent)]
    Fs(#[from] docsync_fs::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }

    /// Whether the error happened while establishing the connection.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::UnsupportedTarget { .. } | Self::Locked { .. }
        )
    }
}
