//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a business-rule rejection raised before anything is
/// recorded; the ledger is unchanged when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A quantity reset targeted less than what is already reserved + sold.
    #[error("quantity too low: {requested} is below committed quantity {committed}")]
    InvalidQuantity { requested: i64, committed: i64 },

    /// A reservation asked for more than is currently available.
    #[error("quantity too big: requested {requested}, available {available}")]
    InsufficientAvailable { requested: i64, available: i64 },

    /// A sale or expiry asked for more than is currently reserved.
    #[error("quantity too big: requested {requested}, reserved {reserved}")]
    InsufficientReserved { requested: i64, reserved: i64 },

    /// A refund asked for more than is currently sold.
    #[error("quantity too big: requested {requested}, sold {sold}")]
    InsufficientSold { requested: i64, sold: i64 },

    /// A pool transition was requested with a negative amount.
    #[error("quantity cannot be negative: {requested}")]
    NegativeQuantity { requested: i64 },

    /// A total or delta would leave the `i64` range.
    #[error("quantity overflow: {0}")]
    Overflow(&'static str),

    /// A replayed journal skipped or repeated a sequence number.
    #[error("journal sequence gap (expected={expected}, found={found})")]
    SequenceGap { expected: u64, found: u64 },

    /// A replayed journal entry no longer follows from the state before it.
    #[error("journal entry {sequence} diverged on replay")]
    ReplayDiverged { sequence: u64 },
}

impl LedgerError {
    pub fn invalid_quantity(requested: i64, committed: i64) -> Self {
        Self::InvalidQuantity { requested, committed }
    }

    pub fn insufficient_available(requested: i64, available: i64) -> Self {
        Self::InsufficientAvailable { requested, available }
    }

    pub fn insufficient_reserved(requested: i64, reserved: i64) -> Self {
        Self::InsufficientReserved { requested, reserved }
    }

    pub fn insufficient_sold(requested: i64, sold: i64) -> Self {
        Self::InsufficientSold { requested, sold }
    }

    pub fn negative_quantity(requested: i64) -> Self {
        Self::NegativeQuantity { requested }
    }

    pub fn overflow(what: &'static str) -> Self {
        Self::Overflow(what)
    }
}
