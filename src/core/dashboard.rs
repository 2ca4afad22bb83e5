//! Dashboard read-side logic and budget repair.
//!
//! The dashboard shows one wallet - the row flagged `show_to_dashboard = "Yes"`
//! - together with the sum of its expenses inside the current statement
//! period. This module resolves that wallet, computes the period-scoped total
//! (never null, 0.0 when nothing matches), and provides an idempotent
//! recompute that re-derives a wallet's running balance from its transaction
//! rows when the stored value is suspected stale.

use crate::{
    core::{
        ReconcilePolicy,
        date::{DateStamp, StatementPeriod},
        lenient_amount,
        wallet::get_dashboard_wallet,
    },
    entities::{Expense, ExpenseColumn, Income, IncomeColumn, Wallet, WalletColumn, wallet},
    errors::{Error, Result},
};
use sea_orm::{TransactionTrait, prelude::*};
use tracing::info;

/// Everything the home screen needs in one read.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// The wallet flagged for the dashboard
    pub wallet: wallet::Model,
    /// Sum of in-period expense amounts against that wallet
    pub total_expenses: f64,
    /// The wallet's current running balance
    pub remaining_budget: f64,
}

/// Sums in-period expense amounts for a wallet over a connection or
/// transaction. Amounts are stored as text, so filtering and summing happen
/// here rather than in SQL; unparseable amounts contribute nothing.
async fn sum_expenses_in_period<C>(db: &C, wallet_id: i64, period: StatementPeriod) -> Result<f64>
where
    C: ConnectionTrait,
{
    let rows = Expense::find()
        .filter(ExpenseColumn::WalletId.eq(wallet_id))
        .all(db)
        .await?;

    Ok(rows
        .iter()
        .filter(|row| period.contains(&DateStamp::normalize(Some(&row.date))))
        .map(|row| lenient_amount(&row.amount))
        .sum())
}

/// Computes the dashboard's period-scoped expense total.
///
/// Returns 0.0 when no wallet is flagged for the dashboard or no expense
/// falls inside its statement period - never an error for either case.
pub async fn compute_dashboard_total(db: &DatabaseConnection) -> Result<f64> {
    let Some(wallet) = get_dashboard_wallet(db).await? else {
        return Ok(0.0);
    };

    let period = StatementPeriod::from_cutoffs(&wallet.start_cutoff, &wallet.end_cutoff);
    sum_expenses_in_period(db, wallet.id, period).await
}

/// Builds the home screen's summary: dashboard wallet, in-period expense
/// total, and remaining budget. None when no wallet is flagged.
pub async fn get_dashboard_summary(db: &DatabaseConnection) -> Result<Option<DashboardSummary>> {
    let Some(wallet) = get_dashboard_wallet(db).await? else {
        return Ok(None);
    };

    let period = StatementPeriod::from_cutoffs(&wallet.start_cutoff, &wallet.end_cutoff);
    let total_expenses = sum_expenses_in_period(db, wallet.id, period).await?;
    let remaining_budget = wallet.budget;

    Ok(Some(DashboardSummary {
        wallet,
        total_expenses,
        remaining_budget,
    }))
}

/// Re-derives a wallet's running balance from first principles and stores it.
///
/// `base_budget` is the balance the wallet started the period with; the
/// stored budget becomes `base + in-effect income - in-effect expenses`,
/// where "in effect" uses the same predicates as insert-time reconciliation
/// (period containment for expenses, policy-gated for income). Running this
/// twice in a row is a no-op, which makes it the repair path for balances
/// left stale by pre-transactional writes.
pub async fn recompute_wallet_budget(
    db: &DatabaseConnection,
    policy: ReconcilePolicy,
    wallet_id: i64,
    base_budget: f64,
) -> Result<wallet::Model> {
    let txn = db.begin().await?;

    let wallet = Wallet::find_by_id(wallet_id)
        .one(&txn)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    let period = StatementPeriod::from_cutoffs(&wallet.start_cutoff, &wallet.end_cutoff);

    let expense_total = sum_expenses_in_period(&txn, wallet_id, period).await?;

    let income_rows = Income::find()
        .filter(IncomeColumn::WalletId.eq(wallet_id))
        .all(&txn)
        .await?;
    let income_total: f64 = income_rows
        .iter()
        .filter(|row| {
            !policy.gate_income_by_period
                || period.contains(&DateStamp::normalize(Some(&row.date)))
        })
        .map(|row| lenient_amount(&row.amount))
        .sum();

    let derived = base_budget + income_total - expense_total;

    use sea_orm::sea_query::Expr;
    Wallet::update_many()
        .col_expr(WalletColumn::Budget, Expr::value(derived))
        .filter(WalletColumn::Id.eq(wallet_id))
        .exec(&txn)
        .await?;

    let updated = Wallet::find_by_id(wallet_id)
        .one(&txn)
        .await?
        .ok_or(Error::WalletNotFound { id: wallet_id })?;

    txn.commit().await?;

    info!(
        wallet_id,
        old_budget = wallet.budget,
        new_budget = derived,
        "Recomputed wallet budget"
    );

    Ok(updated)
}
