//! Income ledger logic - Handles all income-related operations.
//!
//! Mirrors [`crate::core::expense`] with the sign flipped: income credits the
//! wallet's budget. The one deliberate difference is gating. Expense debits
//! only apply inside the statement period; income credits historically applied
//! whenever the wallet existed, regardless of date. That asymmetry is kept as
//! the default and controlled by [`ReconcilePolicy::gate_income_by_period`].

use crate::{
    core::{
        ReconcilePolicy,
        date::{DateStamp, StatementPeriod},
        parse_amount,
        wallet::{adjust_budget, get_wallet_by_id},
    },
    entities::{Income, IncomeColumn, income},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, warn};

/// The signed budget effect an income row has on its wallet. Zero when the
/// wallet is missing or the policy gates it out of period.
async fn budget_effect<C>(
    db: &C,
    policy: ReconcilePolicy,
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
            "Income references a missing wallet; skipping budget adjustment"
        );
        return Ok(0.0);
    };

    if policy.gate_income_by_period {
        let period = StatementPeriod::from_cutoffs(&wallet.start_cutoff, &wallet.end_cutoff);
        if !period.contains(date) {
            debug!(
                wallet_id,
                date = %date.as_storage(),
                "Income date outside statement period; budget unchanged (gated policy)"
            );
            return Ok(0.0);
        }
    }

    Ok(amount)
}

/// Creates a new income record and credits the referenced wallet's budget.
///
/// Under the default policy the credit applies unconditionally whenever the
/// wallet exists - even with an invalid date. The row insert and the credit
/// commit in one transaction; a missing wallet is a logged no-op.
pub async fn create_income(
    db: &DatabaseConnection,
    policy: ReconcilePolicy,
    amount: String,
    date: Option<&str>,
    description: String,
    category: String,
    wallet_id: Option<i64>,
) -> Result<income::Model> {
    let parsed_amount = parse_amount(&amount)?;
    let stamp = DateStamp::normalize(date);

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let model = income::ActiveModel {
        amount: Set(amount),
        date: Set(stamp.as_storage()),
        wallet_id: Set(wallet_id),
        description: Set(description),
        category: Set(category),
        ..Default::default()
    };
    let result = model.insert(&txn).await?;

    let delta = budget_effect(&txn, policy, wallet_id, &stamp, parsed_amount).await?;
    if delta != 0.0 {
        if let Some(wallet_id) = wallet_id {
            adjust_budget(&txn, wallet_id, delta).await?;
        }
    }

    txn.commit().await?;

    Ok(result)
}

/// Retrieves all income records in insertion order, dates re-normalized.
pub async fn get_all_income(db: &DatabaseConnection) -> Result<Vec<income::Model>> {
    let rows = Income::find().order_by_asc(IncomeColumn::Id).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|row| income::Model {
            date: DateStamp::normalize(Some(&row.date)).as_storage(),
            ..row
        })
        .collect())
}

/// Retrieves a specific income record by its unique ID.
pub async fn get_income_by_id(
    db: &DatabaseConnection,
    income_id: i64,
) -> Result<Option<income::Model>> {
    Income::find_by_id(income_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Overwrites an income record's mutable fields and re-reconciles the wallet.
///
/// Same reverse-then-apply shape as expense updates, evaluated under the
/// given policy. A missing row is an explicit [`Error::IncomeNotFound`].
pub async fn update_income(
    db: &DatabaseConnection,
    policy: ReconcilePolicy,
    income_id: i64,
    amount: String,
    date: Option<&str>,
    description: String,
    category: String,
) -> Result<income::Model> {
    let new_amount = parse_amount(&amount)?;
    let new_stamp = DateStamp::normalize(date);

    let txn = db.begin().await?;

    let existing = Income::find_by_id(income_id)
        .one(&txn)
        .await?
        .ok_or(Error::IncomeNotFound { id: income_id })?;

    let wallet_id = existing.wallet_id;
    let old_stamp = DateStamp::normalize(Some(&existing.date));
    let old_amount = crate::core::lenient_amount(&existing.amount);

    let old_effect = budget_effect(&txn, policy, wallet_id, &old_stamp, old_amount).await?;
    let new_effect = budget_effect(&txn, policy, wallet_id, &new_stamp, new_amount).await?;

    let mut model: income::ActiveModel = existing.into();
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

/// Deletes an income record and reverses its credit, atomically.
pub async fn delete_income(
    db: &DatabaseConnection,
    policy: ReconcilePolicy,
    income_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;

    let existing = Income::find_by_id(income_id)
        .one(&txn)
        .await?
        .ok_or(Error::IncomeNotFound { id: income_id })?;

    let wallet_id = existing.wallet_id;
    let stamp = DateStamp::normalize(Some(&existing.date));
    let amount = crate::core::lenient_amount(&existing.amount);

    let effect = budget_effect(&txn, policy, wallet_id, &stamp, amount).await?;

    existing.delete(&txn).await?;

    if effect != 0.0 {
        if let Some(wallet_id) = wallet_id {
            adjust_budget(&txn, wallet_id, -effect).await?;
        }
    }

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::date::INVALID_DATE;
    use crate::core::wallet::get_wallet_by_id;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_income_credits_regardless_of_date() -> Result<()> {
        // Income credits apply whatever the date under the default policy
        let (db, wallet) = setup_with_wallet().await?;

        create_test_income(&db, wallet.id, "500", "2024-06-20").await?;

        let updated = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(updated.budget, 1500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_income_credits_even_with_invalid_date() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;

        let income = create_income(
            &db,
            ReconcilePolicy::default(),
            "500".to_string(),
            None,
            "bonus".to_string(),
            "Salary".to_string(),
            Some(wallet.id),
        )
        .await?;
        assert_eq!(income.date, INVALID_DATE);

        let updated = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(updated.budget, 1500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_gated_policy_subjects_income_to_period() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;
        let gated = ReconcilePolicy {
            gate_income_by_period: true,
        };

        // Out of period: no credit
        create_income(
            &db,
            gated,
            "500".to_string(),
            Some("2024-06-20"),
            "late".to_string(),
            "Salary".to_string(),
            Some(wallet.id),
        )
        .await?;
        let unchanged = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(unchanged.budget, 1000.0);

        // In period: credit applies
        create_income(
            &db,
            gated,
            "500".to_string(),
            Some("2024-01-20"),
            "on time".to_string(),
            "Salary".to_string(),
            Some(wallet.id),
        )
        .await?;
        let credited = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(credited.budget, 1500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_income_missing_wallet_is_a_noop() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;

        let income = create_test_income(&db, 999, "500", "2024-01-15").await?;
        assert!(get_income_by_id(&db, income.id).await?.is_some());

        let untouched = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(untouched.budget, 1000.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_income_applies_delta_difference() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;
        let income = create_test_income(&db, wallet.id, "500", "2024-01-15").await?;

        // 1000 + 500 = 1500; correcting to 300 should land at 1300
        update_income(
            &db,
            ReconcilePolicy::default(),
            income.id,
            "300".to_string(),
            Some("2024-01-15"),
            "corrected".to_string(),
            "Salary".to_string(),
        )
        .await?;

        let updated = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(updated.budget, 1300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_income_reverses_credit() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;
        let income = create_test_income(&db, wallet.id, "500", "2024-03-01").await?;

        delete_income(&db, ReconcilePolicy::default(), income.id).await?;

        let restored = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(restored.budget, 1000.0);
        assert!(get_income_by_id(&db, income.id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_income_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_income(&db, ReconcilePolicy::default(), 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::IncomeNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_mixed_ledger_activity_nets_out() -> Result<()> {
        let (db, wallet) = setup_with_wallet().await?;

        create_test_expense(&db, wallet.id, "150", "2024-01-10").await?;
        create_test_income(&db, wallet.id, "500", "2024-01-20").await?;
        create_test_expense(&db, wallet.id, "50", "2024-01-25").await?;

        let updated = get_wallet_by_id(&db, wallet.id).await?.unwrap();
        assert_eq!(updated.budget, 1300.0);

        Ok(())
    }
}
