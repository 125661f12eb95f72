//! The quantity ledger: every product's stock plus the journal of events that
//! produced it.
//!
//! The ledger is a plain synchronous value. Hosts that share one across
//! threads must serialize mutations themselves (at least per product), since
//! every transition is a check-then-append on the current totals.

use std::collections::HashMap;

use stockledger_core::{Aggregate, LedgerError, LedgerResult, ProductId};
use stockledger_events::{Event, EventEnvelope};

use crate::stock::{ProductStock, StockCommand, StockEvent, StockLevels};

const STREAM_TYPE: &str = "product_stock";

/// The three raw delta sequences of one product.
///
/// `available` holds registrations and resets, `reserved` holds grants and
/// releases, `sold` holds sales and refunds. Summing `reserved` and `sold`
/// gives the current pools; `available` sums to the registered total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolHistory {
    pub available: Vec<i64>,
    pub reserved: Vec<i64>,
    pub sold: Vec<i64>,
}

/// Quantity ledger over any number of products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    stocks: HashMap<ProductId, ProductStock>,
    journal: Vec<EventEnvelope<StockEvent>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from a previously recorded journal.
    ///
    /// Sequence numbers must run 1, 2, 3, ... and each entry must still be
    /// the decision its command produces against the rebuilt state.
    pub fn replay<I>(entries: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = EventEnvelope<StockEvent>>,
    {
        let mut inventory = Self::new();

        for entry in entries {
            let expected = inventory.next_sequence();
            let sequence = entry.sequence_number();
            if sequence != expected {
                return Err(LedgerError::SequenceGap {
                    expected,
                    found: sequence,
                });
            }

            let event = entry.payload();
            if entry.stream_type() != STREAM_TYPE || entry.stream_id() != event.product_id() {
                return Err(LedgerError::ReplayDiverged { sequence });
            }

            let decided = inventory
                .decide(&event.command())
                .map_err(|_| LedgerError::ReplayDiverged { sequence })?;
            if decided.as_slice() != std::slice::from_ref(event) {
                return Err(LedgerError::ReplayDiverged { sequence });
            }

            inventory.record(entry.into_payload());
        }

        tracing::debug!(events = inventory.len(), "inventory journal replayed");
        Ok(inventory)
    }

    /// Add `quantity` to the registered stock of `product_id`.
    ///
    /// Any amount is accepted, negative ones included; the only rejection is
    /// a total that would leave the `i64` range.
    pub fn register_product(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::Register {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Set the registered stock of `product_id` to exactly `quantity`,
    /// however many registrations came before.
    pub fn change_quantity(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::ChangeQuantity {
            product_id: product_id.clone(),
            quantity,
        })
    }

    pub fn available_quantity(&self, product_id: &ProductId) -> i64 {
        self.levels(product_id).available
    }

    pub fn reserved_quantity(&self, product_id: &ProductId) -> i64 {
        self.levels(product_id).reserved
    }

    pub fn sold_quantity(&self, product_id: &ProductId) -> i64 {
        self.levels(product_id).sold
    }

    /// Move `quantity` units from available to reserved.
    pub fn reserve_product(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::Reserve {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Move `quantity` units from reserved to sold.
    pub fn sell_product(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::Sell {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Release `quantity` reserved units back to available without a sale.
    pub fn expire_product(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::Expire {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Reverse `quantity` sold units back to available.
    pub fn refund_product(&mut self, product_id: &ProductId, quantity: i64) -> LedgerResult<()> {
        self.execute(StockCommand::Refund {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// All derived quantities of `product_id`; zero for unknown products.
    pub fn levels(&self, product_id: &ProductId) -> StockLevels {
        self.stocks
            .get(product_id)
            .map(ProductStock::levels)
            .unwrap_or_default()
    }

    pub fn history(&self, product_id: &ProductId) -> PoolHistory {
        let mut history = PoolHistory::default();
        for entry in self.journal.iter().filter(|e| e.stream_id() == product_id) {
            let deltas = entry.payload().deltas();
            history.available.extend(deltas.available);
            history.reserved.extend(deltas.reserved);
            history.sold.extend(deltas.sold);
        }
        history
    }

    /// Products with at least one recorded event, in identifier order.
    pub fn products(&self) -> Vec<&ProductId> {
        let mut ids: Vec<&ProductId> = self.stocks.keys().collect();
        ids.sort();
        ids
    }

    pub fn journal(&self) -> &[EventEnvelope<StockEvent>] {
        &self.journal
    }

    pub fn into_journal(self) -> Vec<EventEnvelope<StockEvent>> {
        self.journal
    }

    pub fn len(&self) -> usize {
        self.journal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    fn execute(&mut self, command: StockCommand) -> LedgerResult<()> {
        let events = self.decide(&command).inspect_err(|err| {
            tracing::debug!(
                product_id = %command.product_id(),
                error = %err,
                "stock command rejected"
            );
        })?;

        for event in events {
            self.record(event);
        }
        Ok(())
    }

    fn decide(&self, command: &StockCommand) -> LedgerResult<Vec<StockEvent>> {
        match self.stocks.get(command.product_id()) {
            Some(stock) => stock.handle(command),
            None => ProductStock::empty(command.product_id().clone()).handle(command),
        }
    }

    fn record(&mut self, event: StockEvent) {
        let sequence = self.next_sequence();
        let product_id = event.product_id().clone();

        tracing::debug!(
            sequence,
            product_id = %product_id,
            event_type = %event.versioned_type(),
            "stock event recorded"
        );

        self.stocks
            .entry(product_id.clone())
            .or_insert_with(|| ProductStock::empty(product_id.clone()))
            .apply(&event);
        self.journal
            .push(EventEnvelope::new(sequence, product_id, STREAM_TYPE, event));
    }

    fn next_sequence(&self) -> u64 {
        self.journal.len() as u64 + 1
    }
}
