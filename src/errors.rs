//! Unified error types and result handling for `WalletLedger`.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures
//! surface as [`Error::Database`]; missing rows are distinct, explicit variants
//! rather than silent zero-row updates. Invalid dates are intentionally NOT an
//! error anywhere in the crate - they degrade to the `"Invalid date"` sentinel
//! (see [`crate::core::date::DateStamp`]).

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing file, bad TOML, invalid field)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A transaction or wallet amount failed validation
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending amount string as given by the caller
        amount: String,
    },

    /// A required field failed boundary validation
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the invalid input
        message: String,
    },

    /// Referenced wallet does not exist
    #[error("Wallet not found: {id}")]
    WalletNotFound {
        /// The wallet id that was looked up
        id: i64,
    },

    /// Referenced expense row does not exist
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The expense id that was looked up
        id: i64,
    },

    /// Referenced income row does not exist
    #[error("Income not found: {id}")]
    IncomeNotFound {
        /// The income id that was looked up
        id: i64,
    },

    /// Underlying storage engine failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error during startup (config file, data directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
