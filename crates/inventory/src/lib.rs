//! Inventory quantity ledger.
//!
//! Tracks three pools per product (available, reserved, sold) and rejects any
//! transition that would drive one of them negative. Pure in-memory domain
//! logic: no IO, no storage, no internal locking.

pub mod ledger;
pub mod stock;

pub use ledger::{Inventory, PoolHistory};
pub use stock::{PoolDeltas, ProductStock, StockCommand, StockEvent, StockLevels};
