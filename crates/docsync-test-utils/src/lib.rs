//! Shared test utilities for the docsync workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for scratch project directories

pub mod tree;

pub use tree::TestTree;
