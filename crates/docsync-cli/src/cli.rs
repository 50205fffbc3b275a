//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// docsync - Keep a versioned copy of a directory tree in a document store
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Configuration:
  DOCSYNC_CONNECTION  store target (memory:, file:///path/store.json, or a path)
  DOCSYNC_PROJECT     project name (defaults to the root directory's name)
  DOCSYNC_ROOT        directory to sync (defaults to the current directory)
  DOCSYNC_LOG         log filter, e.g. debug or docsync_core=trace

The same keys can be set in .docsync.toml at the root.")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Store a new version of every changed local file
    Push,

    /// Write the latest stored version of every file locally
    Pull,

    /// Show the latest version of every stored file
    List,

    /// Delete stored cache and build artifacts, all versions
    Clean,
}
