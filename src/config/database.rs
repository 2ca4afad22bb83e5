//! Database configuration module for `WalletLedger`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. Tables are generated directly from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without hand-written SQL.

use crate::entities::{Expense, Income, Wallet};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database given a connection URL.
///
/// The URL comes from the resolved [`crate::config::AppConfig`], which already
/// applied the `DATABASE_URL` environment override and the built-in default.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables from the entity definitions.
///
/// Creates the expenses, income, and wallets tables. Safe to call on a fresh
/// in-memory database; on an existing file database the engine will reject
/// re-creation, so callers only invoke this during initial setup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let wallet_table = schema.create_table_from_entity(Wallet);
    let expense_table = schema.create_table_from_entity(Expense);
    let income_table = schema.create_table_from_entity(Income);

    db.execute(builder.build(&wallet_table)).await?;
    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&income_table)).await?;

    Ok(())
}
