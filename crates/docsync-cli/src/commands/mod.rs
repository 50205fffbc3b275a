//! Command implementations for docsync-cli
//!
//! Each command opens the configured store once, runs one engine
//! operation, and prints progress markers and a summary to stdout.

pub mod clean;
pub mod list;
pub mod pull;
pub mod push;

pub use clean::run_clean;
pub use list::run_list;
pub use pull::run_pull;
pub use push::run_push;

use colored::Colorize;

use docsync_core::FileEvent;

const RULE: &str = "----------------------------------------------------------------------";

fn done() -> colored::ColoredString {
    "✓".green().bold()
}

fn unchanged() -> colored::ColoredString {
    "⊙".yellow()
}

/// Print one progress line as push or pull handles a file. Pull lines
/// carry the version written.
fn print_event(event: FileEvent<'_>, with_version: bool) {
    match event {
        FileEvent::Synced { path, version } if with_version => {
            println!("  {} {} (v{})", done(), path, version)
        }
        FileEvent::Synced { path, .. } => println!("  {} {}", done(), path),
        FileEvent::Unchanged { path } => {
            println!("  {} {} {}", unchanged(), path, "(unchanged)".dimmed())
        }
    }
}
