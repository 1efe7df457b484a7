//! Storefront command-line interface
//!
//! Browses a catalog and drives a cart and wishlist persisted under a state
//! directory.

use std::process::ExitCode;

use clap::Parser;

use crate::config::{LoggingConfig, StoreSettings};

mod commands;
mod config;
mod logging;

/// Storefront CLI
#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront catalog, cart and wishlist", long_about = None)]
struct Cli {
    /// Catalog and state locations.
    #[command(flatten)]
    store: StoreSettings,

    /// Logging output settings.
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: commands::Command,
}

#[expect(clippy::print_stderr, reason = "top-level error reporting")]
fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init_subscriber(&cli.logging) {
        eprintln!("failed to initialise logging: {error}");

        return ExitCode::FAILURE;
    }

    match commands::run(cli.command, &cli.store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
