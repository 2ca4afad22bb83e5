//! Shared test utilities for `WalletLedger`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{ReconcilePolicy, expense, income, wallet},
    entities::{self, wallet::DashboardFlag},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test wallet with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Wallet name
///
/// # Defaults
/// * `kind`: "Credit Card"
/// * `budget`: 1000.0
/// * period: `2024-01-01` through `2024-01-31`
/// * `show_to_dashboard`: Yes
pub async fn create_test_wallet(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::wallet::Model> {
    wallet::create_wallet(
        db,
        name.to_string(),
        "Credit Card".to_string(),
        1000.0,
        Some("2024-01-01"),
        Some("2024-01-31"),
        DashboardFlag::Yes,
    )
    .await
}

/// Creates a test wallet with a custom budget and dashboard flag, keeping the
/// default January statement period.
pub async fn create_custom_wallet(
    db: &DatabaseConnection,
    name: &str,
    budget: f64,
    show_to_dashboard: DashboardFlag,
) -> Result<entities::wallet::Model> {
    wallet::create_wallet(
        db,
        name.to_string(),
        "Credit Card".to_string(),
        budget,
        Some("2024-01-01"),
        Some("2024-01-31"),
        show_to_dashboard,
    )
    .await
}

/// Creates a test expense with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `wallet_id` - Wallet the expense debits
/// * `amount` - Amount as decimal text
/// * `date` - Transaction date string
///
/// # Defaults
/// * `description`: `"Test expense"`
/// * `category`: `"Food"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    wallet_id: i64,
    amount: &str,
    date: &str,
) -> Result<entities::expense::Model> {
    expense::create_expense(
        db,
        amount.to_string(),
        Some(date),
        "Test expense".to_string(),
        "Food".to_string(),
        Some(wallet_id),
    )
    .await
}

/// Creates a test income record with sensible defaults under the legacy
/// (ungated) reconciliation policy.
///
/// # Defaults
/// * `description`: `"Test income"`
/// * `category`: `"Salary"`
pub async fn create_test_income(
    db: &DatabaseConnection,
    wallet_id: i64,
    amount: &str,
    date: &str,
) -> Result<entities::income::Model> {
    income::create_income(
        db,
        ReconcilePolicy::default(),
        amount.to_string(),
        Some(date),
        "Test income".to_string(),
        "Salary".to_string(),
        Some(wallet_id),
    )
    .await
}

/// Sets up a complete test environment with a dashboard wallet.
/// Returns (db, wallet) for common test scenarios.
pub async fn setup_with_wallet() -> Result<(DatabaseConnection, entities::wallet::Model)> {
    let db = setup_test_db().await?;
    let wallet = create_test_wallet(&db, "Test Wallet").await?;
    Ok((db, wallet))
}
