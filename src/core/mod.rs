//! Core business logic - framework-agnostic ledger, wallet, and dashboard
//! operations.
//!
//! The reconciliation rules live in [`expense`] and [`income`]: every ledger
//! mutation runs inside a single database transaction and applies its budget
//! effect through the atomic delta primitive in [`wallet`], so wallet balances
//! can never observe a lost update.

/// Dashboard wallet resolution and period-scoped totals
pub mod dashboard;
/// Canonical date normalization and statement-period containment
pub mod date;
/// Expense ledger store and reconciliation
pub mod expense;
/// Income ledger store and reconciliation
pub mod income;
/// Wallet store and the atomic budget-delta primitive
pub mod wallet;

use crate::errors::{Error, Result};
use serde::Deserialize;

/// Switches governing how ledger mutations affect wallet budgets.
///
/// Expense debits are always gated by the wallet's statement period. Income
/// credits historically were not - they applied whenever the wallet existed,
/// regardless of date. That asymmetry is preserved as the default, but it is
/// a policy choice here rather than an accident: set `gate_income_by_period`
/// to subject income to the same period check as expenses.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Gate income credits by the statement period (legacy default: false)
    #[serde(default)]
    pub gate_income_by_period: bool,
}

/// Validates an amount string at the write boundary.
///
/// The stored representation stays text, but arithmetic needs a real number:
/// the string must parse as a finite, non-negative `f64`. Anything else is an
/// [`Error::InvalidAmount`] - NaN and infinities must never reach budget
/// arithmetic.
pub fn parse_amount(amount: &str) -> Result<f64> {
    let parsed: f64 = amount.trim().parse().map_err(|_| Error::InvalidAmount {
        amount: amount.to_string(),
    })?;

    if !parsed.is_finite() || parsed < 0.0 {
        return Err(Error::InvalidAmount {
            amount: amount.to_string(),
        });
    }

    Ok(parsed)
}

/// Lenient read-side amount parse.
///
/// Listing must never fail on legacy junk rows, so this takes the longest
/// numeric prefix (`"12.5abc"` reads as 12.5) and falls back to 0.0 when no
/// prefix parses (`"abc"` reads as 0.0).
#[must_use]
pub fn lenient_amount(amount: &str) -> f64 {
    let trimmed = amount.trim();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in trimmed.char_indices() {
        let acceptable = c.is_ascii_digit()
            || (c == '.' && !seen_dot)
            || (i == 0 && (c == '-' || c == '+'));
        if !acceptable {
            break;
        }
        seen_dot |= c == '.';
        end = i + c.len_utf8();
    }

    trimmed[..end].parse().unwrap_or(0.0)
}
