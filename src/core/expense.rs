//! Expense ledger logic - Handles all expense-related operations.
//!
//! This module provides CRUD for expense rows and the reconciliation rules
//! that keep wallet budgets consistent with them. Every mutation runs inside
//! a single database transaction: the row change and the wallet's budget
//! delta commit together or not at all, and the delta itself is applied with
//! the atomic primitive in [`crate::core::wallet`] so concurrent inserts
//! against the same wallet cannot lose updates.
//!
//! An expense only affects the budget while its date falls inside the
//! wallet's statement period; a missing wallet never blocks the ledger write.

use crate::{
    core::{
        date::{DateStamp, StatementPeriod},
        parse_amount,
        wallet::{adjust_budget, get_wallet_by_id},
    },
    entities::{Expense, ExpenseColumn, expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, warn};

/// The signed budget effect an expense row has on its wallet, evaluated
/// against the wallet's current cutoffs. Zero when the wallet is missing,
/// the row has no wallet, or the date is out of period.
async fn budget_effect<C>(
    db: &C,
    wallet_id: Option<i64>,
    date: &DateStamp,
    amount: f64,
) -> Result<f64>
where
    C: ConnectionTrait,
{
    let Some(wallet_id) = wallet_id else {
        return Ok(0.0);
    };

    let Some(wallet) = get_wallet_by_id(db, wallet_id).await? else {
        warn!(
            wallet_id,
            "Expense references a missing wallet; skipping budget adjustment"
        );
        return Ok(0.0);
    };

    let period = StatementPeriod::from_cutoffs(&wallet.start_cutoff, &wallet.end_cutoff);
    if period.contains(date) {
        Ok(-amount)
    } else {
        debug!(
            wallet_id,
            date = %date.as_storage(),
            "Expense date outside statement period; budget unchanged"
        );
        Ok(0.0)
    }
}

/// Creates a new expense and reconciles the referenced wallet's budget.
///
/// The date is normalized first (bad dates become the sentinel, which always
/// resolves to out-of-period). The row insert and the budget debit commit in
/// one transaction. A missing or absent wallet is not an error: the expense
/// is recorded and the adjustment is skipped with a log line.
pub async fn create_expense(
    db: &DatabaseConnection,
    amount: String,
    date: Option<&str>,
    description: String,
    category: String,
    wallet_id: Option<i64>,
) -> Result<expense::Model> {
    let parsed_amount = parse_amount(&amount)?;
    let stamp = DateStamp::normalize(date);

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let model = expense::ActiveModel {
        amount: Set(amount),
        date: Set(stamp.as_storage()),
        wallet_id: Set(wallet_id),
        description: Set(description),
        category: Set(category),
        ..Default::default()
    };
    let result = model.insert(&txn).await?;

    let delta = budget_effect(&txn, wallet_id, &stamp, parsed_amount).await?;
    if delta != 0.0 {
        if let Some(wallet_id) = wallet_id {
            adjust_budget(&txn, wallet_id, delta).await?;
        }
    }

    txn.commit().await?;

    Ok(result)
}

/// Retrieves all expenses in insertion order, with each date re-normalized
/// to canonical form or the sentinel.
pub async fn get_all_expenses(db: &DatabaseConnection) -> Result<Vec<expense::Model>> {
    let rows = Expense::find()
        .order_by_asc(ExpenseColumn::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| expense::Model {
            date: DateStamp::normalize(Some(&row.date)).as_storage(),
            ..row
        })
        .collect())
}

/// Retrieves a specific expense by its unique ID.
pub async fn get_expense_by_id(
    db: &DatabaseConnection,
    expense_id: i64,
) -> Result<Option<expense::Model>> {
    Expense::find_by_id(expense_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Overwrites an expense's mutable fields and re-reconciles the wallet.
///
/// Amount, description, category, and date may all change; `wallet_id` may
/// not. Inside one transaction the old row's budget effect is reversed and
/// the new row's effect applied, both evaluated against the wallet's current
/// cutoffs, so the wallet ends up as if the corrected row had been inserted
/// in the first place. A missing row is an explicit [`Error::ExpenseNotFound`].
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    amount: String,
    date: Option<&str>,
    description: String,
    category: String,
) -> Result<expense::Model> {
    let new_amount = parse_amount(&amount)?;
    let new_stamp = DateStamp::normalize(date);

    let txn = db.begin().await?;

    let existing = Expense::find_by_id(expense_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    let wallet_id = existing.wallet_id;
    let old_stamp = DateStamp::normalize(Some(&existing.date));
    let old_amount = crate::core::lenient_amount(&existing.amount);

    let old_effect = budget_effect(&txn, wallet_id, &old_stamp, old_amount).await?;
    let new_effect = budget_effect(&txn, wallet_id, &new_stamp, new_amount).await?;

    let mut model: expense::ActiveModel = existing.into();
    model.amount = Set(amount);
    model.date = Set(new_stamp.as_storage());
    model.description = Set(description);
    model.category = Set(category);
    let result = model.update(&txn).await?;

    let delta = new_effect - old_effect;
    if delta != 0.0 {
        if let Some(wallet_id) = wallet_id {
            adjust_budget(&txn, wallet_id, delta).await?;
        }
    }

    txn.commit().await?;

    Ok(result)
}

/// Deletes an expense and reverses its budget effect, atomically.
///
/// A missing row is an explicit [`Error::ExpenseNotFound`], never a silent
/// zero-row delete.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Expense::find_by_id(expense_id)
        .one(&txn)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    let wallet_id = existing.wallet_id;
    let stamp = DateStamp::normalize(Some(&existing.date));
    let amount = crate::core::lenient_amount(&existing.amount);

    let effect = budget_effect(&txn, wallet_id, &stamp, amount).await?;

    existing.delete(&txn).await?;

    if effect != 0.0 {
        if let Some(wallet_id) = wallet_id {
            adjust_budget(&txn, wallet_id, -effect).await?;
        }
    }

    txn.commit().await?;
    Ok(())
}
