//! Canonical date handling for stored rows.
//!
//! Every date in storage is either a canonical `YYYY-MM-DD` string or the
//! literal sentinel `"Invalid date"`. Bad input never fails an operation - it
//! degrades to the sentinel. [`DateStamp`] makes that soft-failure policy a
//! visible sum type instead of string comparisons scattered through the code,
//! and [`StatementPeriod`] implements the inclusive cutoff-window containment
//! that gates reconciliation.

use chrono::NaiveDate;

/// The stored stand-in for a date that could not be normalized.
pub const INVALID_DATE: &str = "Invalid date";

/// Outcome of normalizing a date input: a real calendar date or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStamp {
    /// A valid calendar date, stored as `YYYY-MM-DD`
    Canonical(NaiveDate),
    /// Missing or unparseable input, stored as the `"Invalid date"` sentinel
    Fallback,
}

impl DateStamp {
    /// Normalizes arbitrary date input to a [`DateStamp`].
    ///
    /// Accepted inputs:
    /// - an exact `YYYY-MM-DD` string that is a real calendar date
    /// - a datetime string (`YYYY-MM-DDTHH:MM:SS`, optionally with fractional
    ///   seconds and offset), truncated to its date part
    ///
    /// Everything else - `None`, empty or whitespace-only strings, the
    /// sentinel itself, malformed or impossible dates - is [`Fallback`].
    /// Normalization is idempotent: feeding [`Self::as_storage`] output back
    /// in reproduces the same stamp.
    ///
    /// [`Fallback`]: DateStamp::Fallback
    #[must_use]
    pub fn normalize(input: Option<&str>) -> Self {
        let Some(raw) = input else {
            return Self::Fallback;
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Fallback;
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Self::Canonical(date);
        }

        // Datetime inputs keep only the date part, like an ISO-string slice.
        if trimmed.len() > 10 && trimmed.as_bytes().get(10) == Some(&b'T') {
            if let Ok(date) = NaiveDate::parse_from_str(&trimmed[..10], "%Y-%m-%d") {
                return Self::Canonical(date);
            }
        }

        Self::Fallback
    }

    /// Renders the stamp as its storage string: `YYYY-MM-DD` or the sentinel.
    #[must_use]
    pub fn as_storage(&self) -> String {
        match self {
            Self::Canonical(date) => date.format("%Y-%m-%d").to_string(),
            Self::Fallback => INVALID_DATE.to_string(),
        }
    }

    /// True when the stamp holds a real calendar date.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }
}

/// A wallet's inclusive statement period, built from its stored cutoffs.
#[derive(Debug, Clone, Copy)]
pub struct StatementPeriod {
    start: DateStamp,
    end: DateStamp,
}

impl StatementPeriod {
    /// Builds a period from the stored cutoff strings of a wallet row.
    #[must_use]
    pub fn from_cutoffs(start_cutoff: &str, end_cutoff: &str) -> Self {
        Self {
            start: DateStamp::normalize(Some(start_cutoff)),
            end: DateStamp::normalize(Some(end_cutoff)),
        }
    }

    /// Inclusive containment check: `start <= date <= end`.
    ///
    /// Resolves deterministically to false when the date or either cutoff is
    /// [`DateStamp::Fallback`] - an invalid date is always out of period.
    #[must_use]
    pub fn contains(&self, stamp: &DateStamp) -> bool {
        match (self.start, self.end, stamp) {
            (
                DateStamp::Canonical(start),
                DateStamp::Canonical(end),
                DateStamp::Canonical(date),
            ) => start <= *date && *date <= end,
            _ => false,
        }
    }
}
