//! Command-line configuration

use std::path::PathBuf;

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Catalog and state locations.
#[derive(Debug, Args)]
pub(crate) struct StoreSettings {
    /// Catalog YAML document
    #[arg(
        long,
        env = "STOREFRONT_CATALOG",
        global = true,
        default_value = "fixtures/catalog/jewelry.yml"
    )]
    pub(crate) catalog: PathBuf,

    /// Directory holding persisted cart and wishlist state
    #[arg(
        long,
        env = "STOREFRONT_STATE_DIR",
        global = true,
        default_value = ".storefront"
    )]
    pub(crate) state_dir: PathBuf,

    /// Storage namespace, one per storefront instance
    #[arg(
        long,
        env = "STOREFRONT_NAMESPACE",
        global = true,
        default_value = "storefront"
    )]
    pub(crate) namespace: String,
}
