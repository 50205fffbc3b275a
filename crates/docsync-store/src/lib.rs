//! Versioned document store for docsync
//!
//! Every pushed file version becomes one immutable document. This crate
//! defines the record shape and the repository interface the sync engine
//! talks to, plus two backends:
//!
//! - [`MemoryStore`]: process-local, used by tests and the `memory:` target
//! - [`JsonStore`]: a JSON Lines journal holding the whole collection,
//!   locked for the lifetime of the connection
//!
//! # Example
//!
//! ```ignore
//! use docsync_store::{ConnectionTarget, connect};
//!
//! let target: ConnectionTarget = "file:///srv/docsync/store.json".parse()?;
//! let mut store = connect(&target, "my-project")?;
//! let latest = store.latest("src/main.rs")?;
//! ```

pub mod collection;
pub mod error;
pub mod journal;
pub mod json;
pub mod memory;
pub mod model;
pub mod store;
pub mod target;

pub use collection::Collection;
pub use error::{Error, Result};
pub use json::JsonStore;
pub use memory::MemoryStore;
pub use model::{Document, FileKind, FileVersion};
pub use store::VersionStore;
pub use target::{ConnectionTarget, connect};
