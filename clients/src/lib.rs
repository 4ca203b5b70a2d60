//! Shared plumbing of the Specht parity binaries.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use specht_store::Settings;
use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` and
/// `quiet` is used.
pub fn init_tracing(verbose: bool, quiet: &str) {
    let default = if verbose { "debug" } else { quiet };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second install (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Settings from `config` (or `specht.toml`, or defaults) and `SPECHT_DB`,
/// with an explicit `--database` applied last.
///
/// # Errors
///
/// Fails when the settings file cannot be read or parsed.
pub fn load_settings(config: Option<&Path>, database: Option<PathBuf>) -> Result<Settings> {
    let mut settings = Settings::discover(config).context("loading settings")?;
    if let Some(database) = database {
        settings.database = database;
    }
    tracing::debug!(database = %settings.database.display(), "settings loaded");
    Ok(settings)
}
