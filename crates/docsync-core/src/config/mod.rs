//! Configuration resolution
//!
//! A command needs three things: where the store is (`connection`), which
//! project namespace to use (`project`) and which directory is synced
//! (`root`). None of them are compiled in.
//!
//! # Configuration Hierarchy
//!
//! Sources are merged in this order (later sources override earlier):
//!
//! 1. **Defaults** - root is the current directory, project is the root's
//!    directory name
//! 2. **Global config** - `<config_dir>/docsync/config.toml`
//! 3. **Project config** - `<root>/.docsync.toml`
//! 4. **Environment** - `DOCSYNC_CONNECTION`, `DOCSYNC_PROJECT`, `DOCSYNC_ROOT`
//!
//! ```toml
//! connection = "file:///srv/docsync/store.json"
//! project = "my-project"
//! ignore_file = ".syncignore"
//! ```

mod file;
mod resolver;

pub use file::ConfigFile;
pub use resolver::{
    ConfigResolver, ENV_CONFIG_DIR, ENV_CONNECTION, ENV_PROJECT, ENV_ROOT, PROJECT_CONFIG_FILE,
    SyncConfig,
};
