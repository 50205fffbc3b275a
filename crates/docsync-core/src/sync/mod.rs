//! Synchronization between a local tree and a version store
//!
//! This module provides:
//! - `SyncEngine`: push, pull, list and clean
//! - Report types returned by each operation and per-file progress events
//! - Cache-artifact matching used by clean
//! - Human-readable size formatting used by list

mod clean;
mod engine;
mod format;
mod report;

pub use clean::{CACHE_PATTERNS, is_cache_artifact};
pub use engine::SyncEngine;
pub use format::{TIMESTAMP_FORMAT, format_size};
pub use report::{
    CleanReport, FileEvent, ListEntry, ListReport, PullReport, PushReport, RemovedChain,
    SyncedFile,
};
