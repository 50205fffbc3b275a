//! Parsing of a single config.toml file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Settings read from one configuration file.
///
/// Every field is optional so that files from different layers can be
/// merged; [`super::ConfigResolver`] decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Store connection target
    pub connection: Option<String>,
    /// Project namespace
    pub project: Option<String>,
    /// Ignore rules file name, relative to the root
    pub ignore_file: Option<String>,
}

impl ConfigFile {
    /// Parse TOML content
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the file if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Overlay the values set in `other` on top of this file.
    pub fn merge(&mut self, other: ConfigFile) {
        if other.connection.is_some() {
            self.connection = other.connection;
        }
        if other.project.is_some() {
            self.project = other.project;
        }
        if other.ignore_file.is_some() {
            self.ignore_file = other.ignore_file;
        }
    }
}
