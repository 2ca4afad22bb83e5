//! Expense entity - Represents a single spending record.
//!
//! Each expense has an amount stored as text, a canonical-or-sentinel date
//! string, a free-text description, a category label (stored in the legacy
//! `type` column), and an optional `wallet_id` linking it to the wallet it
//! debits. Legacy rows may carry no wallet at all.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount as decimal text, persisted exactly as given
    pub amount: String,
    /// Canonical `YYYY-MM-DD` date or the `"Invalid date"` sentinel
    pub date: String,
    /// ID of the wallet this expense debits; None for legacy rows
    pub wallet_id: Option<i64>,
    /// Free-text description (the UI requires it, storage does not)
    pub description: String,
    /// Category label (stored in the legacy `type` column)
    #[sea_orm(column_name = "type")]
    pub category: String,
}

/// Expense has no schema-level relationships. The `wallet_id` link is a
/// plain value, deliberately not a foreign key constraint: a row may
/// reference a wallet that never existed or was deleted out from under it,
/// and reconciliation treats that as a logged no-op.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
