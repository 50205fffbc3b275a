//! Filesystem layer for docsync
//!
//! Provides forward-slash relative paths, content addressing, ignore-rule
//! matching and the local tree walk used by the sync engine.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod ignore;
pub mod io;
pub mod path;
pub mod walk;

pub use checksum::{BINARY_SNIFF_LEN, content_hash, is_binary};
pub use error::{Error, Result};
pub use ignore::{IgnoreMatcher, IgnoreRule};
pub use path::NormalizedPath;
pub use walk::walk_files;
