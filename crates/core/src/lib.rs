//! `stockledger-core` — building blocks shared by the ledger crates.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{LedgerError, LedgerResult};
pub use id::ProductId;
