//! The UI-facing façade for the wallet ledger.
//!
//! [`Tracker`] owns the database connection and the reconciliation policy and
//! is the single entry point the presentation layer calls: thin async methods
//! for every store/update/delete operation plus read-side queries that
//! normalize stored rows into the shapes a UI consumes. Read methods
//! re-validate every date string defensively (rows that fail come back with
//! the `"Invalid date"` sentinel) and convert stored amount text to `f64`
//! leniently, so listing never fails on legacy data.

use crate::{
    core::{
        self, ReconcilePolicy, dashboard,
        date::DateStamp,
        expense, income, lenient_amount, wallet,
    },
    entities::wallet::DashboardFlag,
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

/// Input shape for storing or updating an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    /// Amount as decimal text
    pub amount: String,
    /// Transaction date; anything unparseable degrades to the sentinel
    pub date: Option<String>,
    /// Free-text description
    pub description: String,
    /// Category label
    pub category: String,
    /// Wallet the expense debits; ignored on update (the link is immutable)
    pub wallet_id: Option<i64>,
}

/// Input shape for storing or updating an income record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncome {
    /// Amount as decimal text
    pub amount: String,
    /// Transaction date; anything unparseable degrades to the sentinel
    pub date: Option<String>,
    /// Free-text description
    pub description: String,
    /// Income source label
    pub category: String,
    /// Wallet the income credits; ignored on update (the link is immutable)
    pub wallet_id: Option<i64>,
}

/// Input shape for storing or updating a wallet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWallet {
    /// Display name
    pub name: String,
    /// Wallet type label
    pub kind: String,
    /// Running balance (initial on store, overwritten on update)
    pub budget: f64,
    /// Statement period start
    pub start_cutoff: Option<String>,
    /// Statement period end
    pub end_cutoff: Option<String>,
    /// Whether this wallet is the dashboard's main wallet
    pub show_to_dashboard: bool,
}

/// A transaction row as the UI consumes it: numeric amount, validated date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    /// Row id
    pub id: i64,
    /// Amount as a number (lenient parse of the stored text)
    pub amount: f64,
    /// Canonical `YYYY-MM-DD` or `"Invalid date"`
    pub date: String,
    /// Free-text description
    pub description: String,
    /// Category or source label
    pub category: String,
    /// Linked wallet, if any
    pub wallet_id: Option<i64>,
}

/// A wallet row as the UI consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletRow {
    /// Row id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Wallet type label
    pub kind: String,
    /// Current running balance
    pub budget: f64,
    /// Statement period start, canonical or sentinel
    pub start_cutoff: String,
    /// Statement period end, canonical or sentinel
    pub end_cutoff: String,
    /// Whether this wallet is flagged for the dashboard
    pub show_to_dashboard: bool,
}

impl From<crate::entities::expense::Model> for TransactionRow {
    fn from(model: crate::entities::expense::Model) -> Self {
        Self {
            id: model.id,
            amount: lenient_amount(&model.amount),
            date: DateStamp::normalize(Some(&model.date)).as_storage(),
            description: model.description,
            category: model.category,
            wallet_id: model.wallet_id,
        }
    }
}

impl From<crate::entities::income::Model> for TransactionRow {
    fn from(model: crate::entities::income::Model) -> Self {
        Self {
            id: model.id,
            amount: lenient_amount(&model.amount),
            date: DateStamp::normalize(Some(&model.date)).as_storage(),
            description: model.description,
            category: model.category,
            wallet_id: model.wallet_id,
        }
    }
}

impl From<crate::entities::wallet::Model> for WalletRow {
    fn from(model: crate::entities::wallet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            kind: model.kind,
            budget: model.budget,
            start_cutoff: DateStamp::normalize(Some(&model.start_cutoff)).as_storage(),
            end_cutoff: DateStamp::normalize(Some(&model.end_cutoff)).as_storage(),
            show_to_dashboard: model.show_to_dashboard.is_shown(),
        }
    }
}

/// The application-state handle the UI layer works through.
#[derive(Debug)]
pub struct Tracker {
    db: DatabaseConnection,
    policy: ReconcilePolicy,
}

impl Tracker {
    /// Builds a tracker over an initialized database connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, policy: ReconcilePolicy) -> Self {
        Self { db, policy }
    }

    /// The reconciliation policy this tracker applies.
    #[must_use]
    pub const fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    /// Stores an expense and reconciles its wallet.
    pub async fn store_expense(&self, data: NewExpense) -> Result<TransactionRow> {
        let model = expense::create_expense(
            &self.db,
            data.amount,
            data.date.as_deref(),
            data.description,
            data.category,
            data.wallet_id,
        )
        .await?;
        Ok(model.into())
    }

    /// Overwrites an expense's mutable fields; `wallet_id` is ignored.
    pub async fn update_expense(&self, id: i64, data: NewExpense) -> Result<TransactionRow> {
        let model = expense::update_expense(
            &self.db,
            id,
            data.amount,
            data.date.as_deref(),
            data.description,
            data.category,
        )
        .await?;
        Ok(model.into())
    }

    /// Deletes an expense and reverses its budget effect.
    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        expense::delete_expense(&self.db, id).await
    }

    /// Stores an income record and reconciles its wallet.
    pub async fn store_income(&self, data: NewIncome) -> Result<TransactionRow> {
        let model = income::create_income(
            &self.db,
            self.policy,
            data.amount,
            data.date.as_deref(),
            data.description,
            data.category,
            data.wallet_id,
        )
        .await?;
        Ok(model.into())
    }

    /// Overwrites an income record's mutable fields; `wallet_id` is ignored.
    pub async fn update_income(&self, id: i64, data: NewIncome) -> Result<TransactionRow> {
        let model = income::update_income(
            &self.db,
            self.policy,
            id,
            data.amount,
            data.date.as_deref(),
            data.description,
            data.category,
        )
        .await?;
        Ok(model.into())
    }

    /// Deletes an income record and reverses its credit.
    pub async fn delete_income(&self, id: i64) -> Result<()> {
        income::delete_income(&self.db, self.policy, id).await
    }

    /// Creates a wallet.
    pub async fn store_wallet(&self, data: NewWallet) -> Result<WalletRow> {
        let flag = if data.show_to_dashboard {
            DashboardFlag::Yes
        } else {
            DashboardFlag::No
        };
        let model = wallet::create_wallet(
            &self.db,
            data.name,
            data.kind,
            data.budget,
            data.start_cutoff.as_deref(),
            data.end_cutoff.as_deref(),
            flag,
        )
        .await?;
        Ok(model.into())
    }

    /// Full-field overwrite of a wallet, budget included.
    pub async fn update_wallet(&self, id: i64, data: NewWallet) -> Result<WalletRow> {
        let flag = if data.show_to_dashboard {
            DashboardFlag::Yes
        } else {
            DashboardFlag::No
        };
        let model = wallet::update_wallet(
            &self.db,
            id,
            data.name,
            data.kind,
            data.budget,
            data.start_cutoff.as_deref(),
            data.end_cutoff.as_deref(),
            flag,
        )
        .await?;
        Ok(model.into())
    }

    /// Deletes a wallet. Its transactions are left behind untouched.
    pub async fn delete_wallet(&self, id: i64) -> Result<()> {
        wallet::delete_wallet(&self.db, id).await
    }

    /// Lists all expenses in insertion order.
    pub async fn fetch_expenses(&self) -> Result<Vec<TransactionRow>> {
        let rows = expense::get_all_expenses(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Lists all income records in insertion order.
    pub async fn fetch_income(&self) -> Result<Vec<TransactionRow>> {
        let rows = income::get_all_income(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Lists all wallets in insertion order.
    pub async fn fetch_wallets(&self) -> Result<Vec<WalletRow>> {
        let rows = wallet::get_all_wallets(&self.db).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Expenses dated within the last `days` days (inclusive of today).
    ///
    /// Rows carrying the sentinel date never qualify. This is the home
    /// screen's recent-activity window.
    pub async fn fetch_recent_expenses(&self, days: i64) -> Result<Vec<TransactionRow>> {
        let today = Utc::now().date_naive();
        let window_start = today - Duration::days(days);

        let rows = self.fetch_expenses().await?;
        Ok(rows
            .into_iter()
            .filter(|row| match DateStamp::normalize(Some(&row.date)) {
                DateStamp::Canonical(date) => window_start <= date && date <= today,
                DateStamp::Fallback => false,
            })
            .collect())
    }

    /// The dashboard wallet's period-scoped expense total; 0.0 when no
    /// wallet is flagged.
    pub async fn fetch_dashboard_total(&self) -> Result<f64> {
        dashboard::compute_dashboard_total(&self.db).await
    }

    /// The full home-screen summary, if a dashboard wallet exists.
    pub async fn fetch_dashboard_summary(&self) -> Result<Option<dashboard::DashboardSummary>> {
        dashboard::get_dashboard_summary(&self.db).await
    }

    /// Re-derives and stores a wallet's running balance from its rows.
    pub async fn recompute_wallet_budget(
        &self,
        wallet_id: i64,
        base_budget: f64,
    ) -> Result<WalletRow> {
        let model =
            dashboard::recompute_wallet_budget(&self.db, self.policy, wallet_id, base_budget)
                .await?;
        Ok(model.into())
    }

    /// Validates an amount string the way the write boundary will.
    pub fn validate_amount(amount: &str) -> Result<f64> {
        core::parse_amount(amount)
    }
}

/// Renders an amount for display: `₱1,234.56`, negatives as `-₱1,234.56`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-\u{20b1}{grouped}.{frac}")
    } else {
        format!("\u{20b1}{grouped}.{frac}")
    }
}
