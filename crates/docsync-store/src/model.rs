//! File version records and their stored document form

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Content classification of a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Binary,
    Text,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable version of one file in one project.
///
/// Versions of a `(project, path)` pair form a dense chain starting at 1;
/// the highest version is the latest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVersion {
    pub project: String,
    /// Forward-slash path relative to the project root
    pub path: String,
    pub version: u64,
    /// Hex SHA-256 of `content`
    pub hash: String,
    /// Raw file bytes
    pub content: Vec<u8>,
    pub is_binary: bool,
    pub size: u64,
    pub updated_at: DateTime<Utc>,
}

impl FileVersion {
    /// Build a record for `content`, computing hash and size and stamping
    /// the current time.
    pub fn new(
        project: impl Into<String>,
        path: impl Into<String>,
        version: u64,
        content: Vec<u8>,
        is_binary: bool,
    ) -> Self {
        Self {
            project: project.into(),
            path: path.into(),
            version,
            hash: docsync_fs::content_hash(&content),
            size: content.len() as u64,
            content,
            is_binary,
            updated_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> FileKind {
        if self.is_binary {
            FileKind::Binary
        } else {
            FileKind::Text
        }
    }
}

/// The stored shape of a [`FileVersion`].
///
/// Content is base64 encoded so the document survives text-only transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub project: String,
    pub path: String,
    pub version: u64,
    pub hash: String,
    pub content: String,
    pub is_binary: bool,
    pub size: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<&FileVersion> for Document {
    fn from(record: &FileVersion) -> Self {
        Self {
            project: record.project.clone(),
            path: record.path.clone(),
            version: record.version,
            hash: record.hash.clone(),
            content: STANDARD.encode(&record.content),
            is_binary: record.is_binary,
            size: record.size,
            updated_at: record.updated_at,
        }
    }
}

impl Document {
    /// Decode back into a [`FileVersion`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptRecord`] if the content is not valid base64 or
    /// its decoded length disagrees with `size`.
    pub fn decode(&self) -> Result<FileVersion> {
        let corrupt = |message: String| Error::CorruptRecord {
            path: self.path.clone(),
            version: self.version,
            message,
        };

        let content = STANDARD
            .decode(self.content.as_bytes())
            .map_err(|e| corrupt(format!("invalid content encoding: {}", e)))?;
        if content.len() as u64 != self.size {
            return Err(corrupt(format!(
                "decoded {} bytes but size is {}",
                content.len(),
                self.size
            )));
        }

        Ok(FileVersion {
            project: self.project.clone(),
            path: self.path.clone(),
            version: self.version,
            hash: self.hash.clone(),
            content,
            is_binary: self.is_binary,
            size: self.size,
            updated_at: self.updated_at,
        })
    }
}
