//! Wallet business logic - Handles all wallet-related operations.
//!
//! Provides CRUD for wallet rows plus the one primitive the reconciliation
//! engine is built on: [`adjust_budget`], an atomic database-level delta
//! update that never reads the balance before writing it. All functions are
//! async and return Result types for error handling.

use crate::{
    core::date::DateStamp,
    entities::{
        Wallet, WalletColumn,
        wallet::{self, DashboardFlag},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, warn};

/// Retrieves all wallets, ordered by id (insertion order).
///
/// Each cutoff string is re-normalized on the way out so callers always see
/// canonical dates or the `"Invalid date"` sentinel, even for rows written by
/// older code.
pub async fn get_all_wallets(db: &DatabaseConnection) -> Result<Vec<wallet::Model>> {
    let rows = Wallet::find().order_by_asc(WalletColumn::Id).all(db).await?;

    Ok(rows.into_iter().map(normalize_row).collect())
}

/// Finds a wallet by its unique ID, returning None if it does not exist.
///
/// This is the lookup the reconciliation engine uses; a missing wallet is a
/// valid outcome there, not an error.
pub async fn get_wallet_by_id<C>(db: &C, wallet_id: i64) -> Result<Option<wallet::Model>>
where
    C: ConnectionTrait,
{
    Wallet::find_by_id(wallet_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a wallet by name, returning the first match if names collide.
///
/// Names are not unique in storage; seeding uses this to stay idempotent.
pub async fn get_wallet_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<wallet::Model>> {
    Wallet::find()
        .filter(WalletColumn::Name.eq(name))
        .order_by_asc(WalletColumn::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new wallet, normalizing both cutoff dates independently.
///
/// The name must be non-empty and the budget finite; bad cutoff dates are not
/// an error - they degrade to the sentinel and simply leave the wallet with no
/// active period (nothing reconciles against it until the cutoffs are fixed).
pub async fn create_wallet(
    db: &DatabaseConnection,
    name: String,
    kind: String,
    budget: f64,
    start_cutoff: Option<&str>,
    end_cutoff: Option<&str>,
    show_to_dashboard: DashboardFlag,
) -> Result<wallet::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Wallet name cannot be empty".to_string(),
        });
    }

    if !budget.is_finite() {
        return Err(Error::InvalidAmount {
            amount: budget.to_string(),
        });
    }

    let wallet = wallet::ActiveModel {
        name: Set(name.trim().to_string()),
        kind: Set(kind),
        budget: Set(budget),
        start_cutoff: Set(DateStamp::normalize(start_cutoff).as_storage()),
        end_cutoff: Set(DateStamp::normalize(end_cutoff).as_storage()),
        show_to_dashboard: Set(show_to_dashboard),
        ..Default::default()
    };

    let result = wallet.insert(db).await?;
    Ok(result)
}

/// Full-field overwrite of an existing wallet.
///
/// Note this includes `budget`: callers editing a wallet while transactions
/// are posting against it should prefer [`adjust_budget`] for balance changes
/// and keep this for metadata edits. A missing row is an explicit
/// [`Error::WalletNotFound`], never a silent zero-row update.
#[allow(clippy::too_many_arguments)]
pub async fn update_wallet(
    db: &DatabaseConnection,
    wallet_id: i64,
    name: String,
    kind: String,
    budget: f64,
    start_cutoff: Option<&str>,
    end_cutoff: Option<&str>,
    show_to_dashboard: DashboardFlag,
) -> Result<wallet::Model> {
    if !budget.is_finite() {
        return Err(Error::InvalidAmount {
            amount: budget.to_string(),
        });
    }

    let existing = Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    let mut model: wallet::ActiveModel = existing.into();
    model.name = Set(name);
    model.kind = Set(kind);
    model.budget = Set(budget);
    model.start_cutoff = Set(DateStamp::normalize(start_cutoff).as_storage());
    model.end_cutoff = Set(DateStamp::normalize(end_cutoff).as_storage());
    model.show_to_dashboard = Set(show_to_dashboard);

    let result = model.update(db).await?;
    Ok(result)
}

/// Deletes a wallet by id.
///
/// There is no cascade: the wallet's transactions stay behind with a dangling
/// `wallet_id`. That matches the storage contract, so the orphan count is
/// logged rather than prevented.
pub async fn delete_wallet(db: &DatabaseConnection, wallet_id: i64) -> Result<()> {
    let wallet = Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    let orphaned_expenses = crate::entities::Expense::find()
        .filter(crate::entities::ExpenseColumn::WalletId.eq(wallet_id))
        .count(db)
        .await?;
    let orphaned_income = crate::entities::Income::find()
        .filter(crate::entities::IncomeColumn::WalletId.eq(wallet_id))
        .count(db)
        .await?;

    wallet.delete(db).await?;

    if orphaned_expenses > 0 || orphaned_income > 0 {
        warn!(
            wallet_id,
            orphaned_expenses, orphaned_income, "Deleted wallet leaves orphaned transactions"
        );
    } else {
        info!(wallet_id, "Deleted wallet");
    }

    Ok(())
}

/// Atomically adjusts a wallet's budget by a signed delta.
///
/// This is the only way reconciliation touches a balance. Instead of reading
/// the current budget, modifying it, and writing it back (which loses updates
/// under concurrent inserts), it issues a single SQL statement:
/// `UPDATE wallets SET budget = budget + delta WHERE id = ?`
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `wallet_id` - ID of the wallet to adjust
/// * `delta` - Amount to add to the budget (negative for debits)
///
/// # Returns
/// The updated wallet model
pub async fn adjust_budget<C>(db: &C, wallet_id: i64, delta: f64) -> Result<wallet::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the wallet exists
    let _wallet = Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    // Perform atomic update: budget = budget + delta
    Wallet::update_many()
        .col_expr(
            WalletColumn::Budget,
            Expr::col(WalletColumn::Budget).add(delta),
        )
        .filter(WalletColumn::Id.eq(wallet_id))
        .exec(db)
        .await?;

    // Return the updated wallet
    Wallet::find_by_id(wallet_id)
        .one(db)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })
}

/// Finds the wallet flagged for the dashboard, if any.
///
/// At-most-one `"Yes"` wallet is the intended shape but storage does not
/// enforce it; when several rows carry the flag the lowest id wins and a
/// warning makes the ambiguity visible.
pub async fn get_dashboard_wallet<C>(db: &C) -> Result<Option<wallet::Model>>
where
    C: ConnectionTrait,
{
    let flagged = Wallet::find()
        .filter(WalletColumn::ShowToDashboard.eq(DashboardFlag::Yes))
        .order_by_asc(WalletColumn::Id)
        .all(db)
        .await?;

    if flagged.len() > 1 {
        warn!(
            count = flagged.len(),
            "Multiple wallets flagged for dashboard; using the first by id"
        );
    }

    Ok(flagged.into_iter().next())
}

fn normalize_row(row: wallet::Model) -> wallet::Model {
    wallet::Model {
        start_cutoff: DateStamp::normalize(Some(&row.start_cutoff)).as_storage(),
        end_cutoff: DateStamp::normalize(Some(&row.end_cutoff)).as_storage(),
        ..row
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::date::INVALID_DATE;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_wallet_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        // Empty name
        let result = create_wallet(
            &db,
            String::new(),
            "Others".to_string(),
            100.0,
            None,
            None,
            DashboardFlag::No,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Whitespace-only name
        let result = create_wallet(
            &db,
            "   ".to_string(),
            "Others".to_string(),
            100.0,
            None,
            None,
            DashboardFlag::No,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Non-finite budget
        let result = create_wallet(
            &db,
            "Test".to_string(),
            "Others".to_string(),
            f64::NAN,
            None,
            None,
            DashboardFlag::No,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_wallet_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let wallet = create_test_wallet(&db, "Main Card").await?;

        assert_eq!(wallet.name, "Main Card");
        assert_eq!(wallet.kind, "Credit Card");
        assert_eq!(wallet.budget, 1000.0);
        assert_eq!(wallet.start_cutoff, "2024-01-01");
        assert_eq!(wallet.end_cutoff, "2024-01-31");
        assert_eq!(wallet.show_to_dashboard, DashboardFlag::Yes);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_wallet_bad_cutoffs_degrade_to_sentinel() -> Result<()> {
        let db = setup_test_db().await?;

        let wallet = create_wallet(
            &db,
            "Loose Cash".to_string(),
            "Others".to_string(),
            50.0,
            Some("sometime in January"),
            None,
            DashboardFlag::No,
        )
        .await?;

        assert_eq!(wallet.start_cutoff, INVALID_DATE);
        assert_eq!(wallet.end_cutoff, INVALID_DATE);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_budget_applies_delta() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;

        let debited = adjust_budget(&db, wallet.id, -150.0).await?;
        assert_eq!(debited.budget, 850.0);

        let credited = adjust_budget(&db, wallet.id, 500.0).await?;
        assert_eq!(credited.budget, 1350.0);

        // Verify persistence
        let retrieved = Wallet::find_by_id(wallet.id).one(&db).await?.unwrap();
        assert_eq!(retrieved.budget, 1350.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_budget_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = adjust_budget(&db, 999, 10.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_wallet_overwrites_all_fields() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;

        let updated = update_wallet(
            &db,
            wallet.id,
            "Renamed".to_string(),
            "Savings Account".to_string(),
            2500.0,
            Some("2024-02-01"),
            Some("2024-02-29"),
            DashboardFlag::No,
        )
        .await?;

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.kind, "Savings Account");
        assert_eq!(updated.budget, 2500.0);
        assert_eq!(updated.start_cutoff, "2024-02-01");
        assert_eq!(updated.end_cutoff, "2024-02-29");
        assert_eq!(updated.show_to_dashboard, DashboardFlag::No);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_wallet_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = update_wallet(
            &db,
            999,
            "Ghost".to_string(),
            "Others".to_string(),
            0.0,
            None,
            None,
            DashboardFlag::No,
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_wallet_keeps_transactions() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;
        let expense = create_test_expense(&db, wallet.id, "150", "2024-01-15").await?;

        delete_wallet(&db, wallet.id).await?;

        // Wallet gone
        assert!(get_wallet_by_id(&db, wallet.id).await?.is_none());

        // Expense orphaned but intact
        let orphan = crate::entities::Expense::find_by_id(expense.id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(orphan.wallet_id, Some(wallet.id));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_wallet_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_wallet(&db, 42).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::WalletNotFound { id: 42 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_dashboard_wallet_first_by_id_wins() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_wallet(&db, "Hidden", 100.0, DashboardFlag::No).await?;
        let first = create_custom_wallet(&db, "First", 200.0, DashboardFlag::Yes).await?;
        create_custom_wallet(&db, "Second", 300.0, DashboardFlag::Yes).await?;

        let dashboard = get_dashboard_wallet(&db).await?.unwrap();
        assert_eq!(dashboard.id, first.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_dashboard_wallet_none() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_wallet(&db, "Hidden", 100.0, DashboardFlag::No).await?;
        assert!(get_dashboard_wallet(&db).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_wallets_insertion_order() -> Result<()> {
        let db = setup_test_db().await?;

        let a = create_test_wallet(&db, "A").await?;
        let b = create_test_wallet(&db, "B").await?;

        let wallets = get_all_wallets(&db).await?;
        assert_eq!(wallets.len(), 2);
        assert_eq!(wallets[0].id, a.id);
        assert_eq!(wallets[1].id, b.id);

        Ok(())
    }
}
