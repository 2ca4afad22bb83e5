//! Wallet entity - Represents a budget envelope with a running balance.
//!
//! Each wallet has a name, a type label, a mutable `budget` (a running balance,
//! not a fixed ceiling), an inclusive statement period (`start_cutoff` to
//! `end_cutoff`), and a `show_to_dashboard` flag marking the home screen's
//! primary wallet. Backticks are used for field names to enable proper
//! documentation linking.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored value of the dashboard-visibility flag.
///
/// The schema keeps this as a `"Yes"`/`"No"` text column. At most one wallet
/// is expected to carry `"Yes"`, but storage does not enforce that - the
/// dashboard picks the lowest-id match and warns about duplicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DashboardFlag {
    /// This wallet is shown as the dashboard's main wallet
    #[sea_orm(string_value = "Yes")]
    Yes,
    /// This wallet is not shown on the dashboard
    #[sea_orm(string_value = "No")]
    No,
}

impl DashboardFlag {
    /// True for the `"Yes"` value.
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Wallet database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    /// Unique identifier for the wallet
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display label, not guaranteed unique
    pub name: String,
    /// Wallet type label (e.g., "Credit Card", "Savings Account"); free
    /// vocabulary, the UI constrains it, storage does not
    #[sea_orm(column_name = "type")]
    pub kind: String,
    /// Running balance - decreased by in-period expenses, increased by income
    pub budget: f64,
    /// Statement period start, canonical `YYYY-MM-DD` or `"Invalid date"`
    pub start_cutoff: String,
    /// Statement period end, canonical `YYYY-MM-DD` or `"Invalid date"`
    pub end_cutoff: String,
    /// Whether this wallet is the dashboard's main wallet
    pub show_to_dashboard: DashboardFlag,
}

/// Wallet has no schema-level relationships. Transactions point at wallets
/// through their `wallet_id` value only; deleting a wallet leaves them
/// behind as orphans rather than cascading or being blocked by a constraint.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
