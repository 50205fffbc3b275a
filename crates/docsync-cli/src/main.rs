//! docsync CLI
//!
//! Push, pull, list and clean versioned copies of a directory tree.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use docsync_core::ConfigResolver;
use error::Result;

/// Environment variable holding the log filter
const ENV_LOG: &str = "DOCSYNC_LOG";

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if e.is_connection() {
            eprintln!(
                "Check the store target in {} or .docsync.toml.",
                docsync_core::config::ENV_CONNECTION.cyan()
            );
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} Versioned directory sync", "docsync".green().bold());
        println!();
        println!("Run {} for available commands.", "docsync --help".cyan());
        return Ok(());
    };

    install_interrupt_handler();

    let config = ConfigResolver::from_current_dir()?.resolve()?;

    println!("=== docsync ===");
    println!("Root path: {}", config.root.display());
    println!("Project: {}", config.project);
    println!();

    match command {
        Commands::Push => commands::run_push(&config),
        Commands::Pull => commands::run_pull(&config),
        Commands::List => commands::run_list(&config),
        Commands::Clean => commands::run_clean(&config),
    }
}

/// Log to stderr, filtered by `DOCSYNC_LOG` (default `warn`), or at debug
/// level when verbose.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

/// Exit with status 1 on Ctrl-C.
///
/// The store lock is an OS advisory lock and is dropped with the process.
/// Every stored version is written in a single atomic step, so an
/// interrupted command leaves the store consistent.
fn install_interrupt_handler() {
    if let Err(err) = ctrlc::set_handler(|| {
        eprintln!();
        eprintln!("Operation cancelled by user");
        std::process::exit(1);
    }) {
        tracing::warn!(error = %err, "Failed to install Ctrl-C handler");
    }
}
