//! Startup binary for `WalletLedger`.
//!
//! Wires the full startup path the UI would sit on top of: tracing, `.env`,
//! configuration, database initialization, wallet seeding, and a dashboard
//! read-out. No screens are rendered here - the presentation layer talks to
//! [`wallet_ledger::service::Tracker`].

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wallet_ledger::{
    config::{self, database, wallets},
    errors::Result,
    service::{Tracker, format_amount},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenvy::dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Connect and create tables on a fresh database
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))
        .ok(); // tables may already exist on a file database

    // 5. Seed starter wallets from config (idempotent by name)
    wallets::seed_initial_wallets(&db, &app_config.wallets)
        .await
        .inspect(|()| info!("Starter wallets seeded."))
        .inspect_err(|e| error!("Failed to seed wallets: {e}"))?;

    // 6. Read out the dashboard over the façade
    let tracker = Tracker::new(db, app_config.policy);
    match tracker.fetch_dashboard_summary().await? {
        Some(summary) => info!(
            wallet = %summary.wallet.name,
            spent = %format_amount(summary.total_expenses),
            remaining = %format_amount(summary.remaining_budget),
            "Dashboard summary"
        ),
        None => info!("No wallet is flagged for the dashboard."),
    }

    Ok(())
}
