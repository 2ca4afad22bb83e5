//! Application configuration for `WalletLedger`.
//!
//! Settings merge three layers: built-in defaults, an optional `config.toml`,
//! and environment variables (highest precedence). The TOML file may also
//! carry `[[wallets]]` starter definitions used to seed the database on first
//! run.

/// Database connection and table creation
pub mod database;

/// Starter wallet definitions from config.toml and idempotent seeding
pub mod wallets;

use crate::{
    core::ReconcilePolicy,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/wallet_ledger.sqlite";

/// Raw shape of config.toml; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    #[serde(default)]
    reconcile: ReconcilePolicy,
    #[serde(default)]
    wallets: Vec<wallets::WalletConfig>,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,
    /// Reconciliation policy switches
    pub policy: ReconcilePolicy,
    /// Starter wallets to seed on startup
    pub wallets: Vec<wallets::WalletConfig>,
}

fn parse_file<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration from an optional config file path.
///
/// A missing file is not an error (defaults apply); a present-but-malformed
/// file is. `DATABASE_URL` in the environment overrides the file value.
pub fn load_app_configuration_from<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let file = if path.as_ref().exists() {
        let parsed = parse_file(&path)?;
        info!(path = %path.as_ref().display(), "Loaded configuration file");
        parsed
    } else {
        info!(
            path = %path.as_ref().display(),
            "No configuration file found; using defaults"
        );
        FileConfig::default()
    };

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        file.database_url
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    });

    Ok(AppConfig {
        database_url,
        policy: file.reconcile,
        wallets: file.wallets,
    })
}

/// Loads configuration from the default location (./config.toml).
pub fn load_app_configuration() -> Result<AppConfig> {
    load_app_configuration_from("config.toml")
}
