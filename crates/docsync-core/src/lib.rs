//! Core orchestration layer for docsync
//!
//! This crate ties the Layer 0 crates together:
//!
//! - **Configuration resolution**: connection target, project and root from
//!   layered config files and the environment
//! - **SyncEngine**: push, pull, list and clean against a [`VersionStore`]
//!
//! # Architecture
//!
//! ```text
//!            CLI
//!             |
//!        docsync-core
//!             |
//!     +-------+--------+
//!     |                |
//! docsync-fs    docsync-store
//! ```
//!
//! # Example
//!
//! ```ignore
//! use docsync_core::{ConfigResolver, SyncEngine};
//!
//! let config = ConfigResolver::from_current_dir()?.resolve()?;
//! let mut engine = SyncEngine::connect(&config)?;
//! let report = engine.push()?;
//! println!("{} pushed", report.pushed.len());
//! ```
//!
//! [`VersionStore`]: docsync_store::VersionStore

pub mod config;
pub mod error;
pub mod sync;

pub use config::{ConfigResolver, SyncConfig};
pub use error::{Error, Result};
pub use sync::{
    CleanReport, FileEvent, ListEntry, ListReport, PullReport, PushReport, RemovedChain, SyncEngine,
    SyncedFile, format_size, is_cache_artifact,
};
