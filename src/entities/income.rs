//! Income entity - Represents a single income record.
//!
//! Identical shape to [`super::expense`], kept as a separate table per the
//! storage layout: amount as text, canonical-or-sentinel date, description,
//! source label in the legacy `type` column, optional `wallet_id` naming the
//! wallet the income credits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income")]
pub struct Model {
    /// Unique identifier for the income record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Amount as decimal text, persisted exactly as given
    pub amount: String,
    /// Canonical `YYYY-MM-DD` date or the `"Invalid date"` sentinel
    pub date: String,
    /// ID of the wallet this income credits; None for legacy rows
    pub wallet_id: Option<i64>,
    /// Free-text description
    pub description: String,
    /// Income source label (stored in the legacy `type` column)
    #[sea_orm(column_name = "type")]
    pub category: String,
}

/// Income has no schema-level relationships. As with expenses, `wallet_id`
/// is a plain value rather than a foreign key constraint, so legacy and
/// orphaned rows remain storable.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
