//! Connection targets
//!
//! A connection target names the backend a command talks to:
//!
//! - `memory:`: a fresh [`MemoryStore`]
//! - `file:///abs/path/store.json`: a [`JsonStore`]
//! - a bare filesystem path: a [`JsonStore`]
//!
//! Any other `scheme://` is rejected.

use std::path::PathBuf;
use std::str::FromStr;

use crate::json::JsonStore;
use crate::memory::MemoryStore;
use crate::store::VersionStore;
use crate::{Error, Result};

/// Parsed connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Memory,
    JsonFile(PathBuf),
}

impl FromStr for ConnectionTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::Connection {
                target: String::new(),
                message: "connection target is empty".into(),
            });
        }
        if s == "memory:" || s == "memory://" {
            return Ok(Self::Memory);
        }
        if let Some(path) = s.strip_prefix("file://") {
            return Ok(Self::JsonFile(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(Error::UnsupportedTarget {
                scheme: scheme.to_string(),
            });
        }
        Ok(Self::JsonFile(PathBuf::from(s)))
    }
}

impl std::fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory:"),
            Self::JsonFile(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Open a project-scoped store for `target`.
///
/// The returned store owns any backend resources (such as the JSON store's
/// lock) and releases them when dropped.
pub fn connect(target: &ConnectionTarget, project: &str) -> Result<Box<dyn VersionStore>> {
    tracing::info!(%target, project, "Connecting to store");
    match target {
        ConnectionTarget::Memory => Ok(Box::new(MemoryStore::new(project))),
        ConnectionTarget::JsonFile(path) => Ok(Box::new(JsonStore::open(path.clone(), project)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("memory:", ConnectionTarget::Memory)]
    #[case("memory://", ConnectionTarget::Memory)]
    #[case("file:///srv/store.json", ConnectionTarget::JsonFile("/srv/store.json".into()))]
    #[case("./store.json", ConnectionTarget::JsonFile("./store.json".into()))]
    #[case("  /tmp/s.json ", ConnectionTarget::JsonFile("/tmp/s.json".into()))]
    fn parses_supported_targets(#[case] input: &str, #[case] expected: ConnectionTarget) {
        assert_eq!(input.parse::<ConnectionTarget>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_scheme() {
        let err = "mongodb+srv://cluster.example".parse::<ConnectionTarget>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget { ref scheme } if scheme == "mongodb+srv"));
        assert!(err.is_connection());
    }

    #[test]
    fn rejects_empty_target() {
        assert!("".parse::<ConnectionTarget>().is_err());
    }
}
