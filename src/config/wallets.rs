//! Starter wallet definitions and idempotent database seeding.
//!
//! `config.toml` may declare `[[wallets]]` entries. On startup each entry is
//! inserted only if no wallet with that name already exists, so re-running
//! the application never duplicates wallets.

use crate::{
    core::wallet::{create_wallet, get_wallet_by_name},
    entities::wallet::DashboardFlag,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::{debug, info};

/// Configuration for a single starter wallet
#[derive(Debug, Deserialize, Clone)]
pub struct WalletConfig {
    /// Display name of the wallet
    pub name: String,
    /// Wallet type label (e.g., "Credit Card", "Savings Account")
    pub kind: String,
    /// Initial running balance
    pub budget: f64,
    /// Statement period start (`YYYY-MM-DD`); bad values degrade to the sentinel
    pub start_cutoff: Option<String>,
    /// Statement period end (`YYYY-MM-DD`); bad values degrade to the sentinel
    pub end_cutoff: Option<String>,
    /// Whether this wallet is the dashboard's main wallet
    #[serde(default)]
    pub show_to_dashboard: bool,
}

/// Seeds the configured starter wallets, skipping any name that already
/// exists. Safe to run on every startup.
pub async fn seed_initial_wallets(
    db: &DatabaseConnection,
    configs: &[WalletConfig],
) -> Result<()> {
    info!(
        count = configs.len(),
        "Seeding starter wallets from configuration"
    );

    for cfg in configs {
        if get_wallet_by_name(db, &cfg.name).await?.is_some() {
            debug!(name = %cfg.name, "Wallet already exists; skipping seed entry");
            continue;
        }

        let flag = if cfg.show_to_dashboard {
            DashboardFlag::Yes
        } else {
            DashboardFlag::No
        };

        let created = create_wallet(
            db,
            cfg.name.clone(),
            cfg.kind.clone(),
            cfg.budget,
            cfg.start_cutoff.as_deref(),
            cfg.end_cutoff.as_deref(),
            flag,
        )
        .await?;
        info!(id = created.id, name = %created.name, "Seeded wallet");
    }

    Ok(())
}
