//! Configuration resolution with layered merge

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use docsync_fs::constants::DEFAULT_IGNORE_FILE;
use docsync_store::ConnectionTarget;

use super::file::ConfigFile;
use crate::{Error, Result};

/// Per-project config file name, relative to the root
pub const PROJECT_CONFIG_FILE: &str = ".docsync.toml";

pub const ENV_CONNECTION: &str = "DOCSYNC_CONNECTION";
pub const ENV_PROJECT: &str = "DOCSYNC_PROJECT";
pub const ENV_ROOT: &str = "DOCSYNC_ROOT";
/// Overrides the global config directory
pub const ENV_CONFIG_DIR: &str = "DOCSYNC_CONFIG_DIR";

/// Fully resolved settings for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Store connection target
    pub connection: String,
    /// Project namespace for every stored record
    pub project: String,
    /// Directory being synced
    pub root: PathBuf,
    /// Ignore rules file name, relative to `root`
    pub ignore_file: String,
}

impl SyncConfig {
    /// Build a config with the default ignore file name.
    pub fn new(
        connection: impl Into<String>,
        project: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            connection: connection.into(),
            project: project.into(),
            root: root.into(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
        }
    }

    /// Parse the connection string.
    pub fn target(&self) -> Result<ConnectionTarget> {
        Ok(self.connection.parse()?)
    }
}

/// Resolves a [`SyncConfig`] by merging config files and the environment.
pub struct ConfigResolver {
    /// Directory the command was started from
    cwd: PathBuf,

    /// Override for the process environment (used for testing).
    env_override: Option<HashMap<String, String>>,

    /// Override for the global config directory (used for testing).
    /// When `None`, `$DOCSYNC_CONFIG_DIR` or the platform-appropriate
    /// directory via `dirs::config_dir()` is used.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a resolver for a command started in `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            env_override: None,
            global_config_dir_override: None,
        }
    }

    /// Create a resolver for the process's current directory.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Replace the process environment with `vars`.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_override = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Use a custom global config directory.
    pub fn with_global_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_config_dir_override = Some(dir.into());
        self
    }

    fn env_var(&self, key: &str) -> Option<String> {
        let value = match &self.env_override {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        if let Some(dir) = self.env_var(ENV_CONFIG_DIR) {
            return Some(PathBuf::from(dir));
        }
        dirs::config_dir().map(|d| d.join("docsync"))
    }

    /// The root directory commands will operate on.
    pub fn root(&self) -> PathBuf {
        match self.env_var(ENV_ROOT) {
            Some(root) => self.cwd.join(root),
            None => self.cwd.clone(),
        }
    }

    /// Resolve the configuration by merging all sources.
    ///
    /// Missing config files are skipped. Invalid TOML in any file is an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if a config file cannot be parsed
    /// - [`Error::ConfigMissing`] if no source provides a connection target
    ///   or the project name resolves to an empty string
    pub fn resolve(&self) -> Result<SyncConfig> {
        let root = self.root();
        let mut merged = ConfigFile::default();

        // Layer 2 - Global config (<config_dir>/docsync/config.toml)
        if let Some(global_dir) = self.global_config_dir() {
            let global_config_path = global_dir.join("config.toml");
            load_layer(&mut merged, &global_config_path, "global")?;
        }

        // Layer 3 - Project config (<root>/.docsync.toml)
        load_layer(&mut merged, &root.join(PROJECT_CONFIG_FILE), "project")?;

        // Layer 4 - Environment
        merged.merge(ConfigFile {
            connection: self.env_var(ENV_CONNECTION),
            project: self.env_var(ENV_PROJECT),
            ignore_file: None,
        });

        let connection = merged
            .connection
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::ConfigMissing {
                key: "connection".into(),
                env: ENV_CONNECTION.into(),
            })?;

        // Layer 1 - Default project name is the root directory's name
        let project = merged
            .project
            .or_else(|| default_project(&root))
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::ConfigMissing {
                key: "project".into(),
                env: ENV_PROJECT.into(),
            })?;

        let ignore_file = merged
            .ignore_file
            .unwrap_or_else(|| DEFAULT_IGNORE_FILE.to_string());

        tracing::debug!(%connection, %project, root = %root.display(), "Resolved configuration");

        Ok(SyncConfig {
            connection,
            project,
            root,
            ignore_file,
        })
    }
}

fn load_layer(merged: &mut ConfigFile, path: &Path, layer: &str) -> Result<()> {
    if path.is_file() {
        tracing::debug!(path = %path.display(), layer, "Loading config layer");
        merged.merge(ConfigFile::load(path)?);
    } else {
        tracing::debug!(path = %path.display(), layer, "No config found, skipping");
    }
    Ok(())
}

fn default_project(root: &Path) -> Option<String> {
    // `root` may end in `.` or `..`; fall back to the canonical name
    let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().into_owned());
    name(root).or_else(|| std::fs::canonicalize(root).ok().and_then(|p| name(&p)))
}
