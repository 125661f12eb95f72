use serde::{Deserialize, Serialize};

use stockledger_core::{Aggregate, AggregateRoot, LedgerError, ProductId};
use stockledger_events::Event;

/// Derived quantities of one product at a point in time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevels {
    /// Registered units that are neither reserved nor sold.
    pub available: i64,
    pub reserved: i64,
    pub sold: i64,
    /// Total stock ever registered (after any quantity reset).
    pub registered: i64,
}

/// Signed changes one event makes to the three raw pool histories.
///
/// `None` means the event leaves no entry in that history; `Some(0)` is a
/// recorded zero delta.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PoolDeltas {
    pub available: Option<i64>,
    pub reserved: Option<i64>,
    pub sold: Option<i64>,
}

/// Aggregate root: ProductStock.
///
/// Holds running totals rather than the raw delta sequences; the sequences
/// live in the ledger journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStock {
    id: ProductId,
    registered: i64,
    reserved: i64,
    sold: i64,
    version: u64,
}

impl ProductStock {
    /// Zero stock in every pool (the state of a never-seen product).
    pub fn empty(id: ProductId) -> Self {
        Self {
            id,
            registered: 0,
            reserved: 0,
            sold: 0,
            version: 0,
        }
    }

    pub fn registered(&self) -> i64 {
        self.registered
    }

    pub fn reserved(&self) -> i64 {
        self.reserved
    }

    pub fn sold(&self) -> i64 {
        self.sold
    }

    /// Exact for any state reached through `handle`, which keeps
    /// `registered - committed` within `i64`.
    pub fn available(&self) -> i64 {
        self.registered.saturating_sub(self.committed())
    }

    /// Units that a quantity reset must not go below.
    pub fn committed(&self) -> i64 {
        self.reserved.saturating_add(self.sold)
    }

    pub fn levels(&self) -> StockLevels {
        StockLevels {
            available: self.available(),
            reserved: self.reserved,
            sold: self.sold,
            registered: self.registered,
        }
    }
}

impl AggregateRoot for ProductStock {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockCommand {
    Register { product_id: ProductId, quantity: i64 },
    ChangeQuantity { product_id: ProductId, quantity: i64 },
    Reserve { product_id: ProductId, quantity: i64 },
    Sell { product_id: ProductId, quantity: i64 },
    Expire { product_id: ProductId, quantity: i64 },
    Refund { product_id: ProductId, quantity: i64 },
}

impl StockCommand {
    pub fn product_id(&self) -> &ProductId {
        match self {
            StockCommand::Register { product_id, .. }
            | StockCommand::ChangeQuantity { product_id, .. }
            | StockCommand::Reserve { product_id, .. }
            | StockCommand::Sell { product_id, .. }
            | StockCommand::Expire { product_id, .. }
            | StockCommand::Refund { product_id, .. } => product_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StockEvent {
    ProductRegistered {
        product_id: ProductId,
        quantity: i64,
    },
    QuantityChanged {
        product_id: ProductId,
        previous: i64,
        quantity: i64,
    },
    ProductReserved {
        product_id: ProductId,
        quantity: i64,
    },
    ProductSold {
        product_id: ProductId,
        quantity: i64,
    },
    ReservationExpired {
        product_id: ProductId,
        quantity: i64,
    },
    ProductRefunded {
        product_id: ProductId,
        quantity: i64,
    },
}

impl StockEvent {
    pub fn product_id(&self) -> &ProductId {
        match self {
            StockEvent::ProductRegistered { product_id, .. }
            | StockEvent::QuantityChanged { product_id, .. }
            | StockEvent::ProductReserved { product_id, .. }
            | StockEvent::ProductSold { product_id, .. }
            | StockEvent::ReservationExpired { product_id, .. }
            | StockEvent::ProductRefunded { product_id, .. } => product_id,
        }
    }

    pub fn deltas(&self) -> PoolDeltas {
        match *self {
            StockEvent::ProductRegistered { quantity, .. } => PoolDeltas {
                available: Some(quantity),
                ..PoolDeltas::default()
            },
            StockEvent::QuantityChanged {
                previous, quantity, ..
            } => PoolDeltas {
                available: Some(quantity.saturating_sub(previous)),
                ..PoolDeltas::default()
            },
            StockEvent::ProductReserved { quantity, .. } => PoolDeltas {
                reserved: Some(quantity),
                ..PoolDeltas::default()
            },
            StockEvent::ProductSold { quantity, .. } => PoolDeltas {
                reserved: Some(quantity.saturating_neg()),
                sold: Some(quantity),
                ..PoolDeltas::default()
            },
            StockEvent::ReservationExpired { quantity, .. } => PoolDeltas {
                reserved: Some(quantity.saturating_neg()),
                ..PoolDeltas::default()
            },
            StockEvent::ProductRefunded { quantity, .. } => PoolDeltas {
                sold: Some(quantity.saturating_neg()),
                ..PoolDeltas::default()
            },
        }
    }

    /// The command that, decided against the state preceding this event,
    /// produces it again. Used to re-validate a journal on replay.
    pub fn command(&self) -> StockCommand {
        let product_id = self.product_id().clone();
        match *self {
            StockEvent::ProductRegistered { quantity, .. } => {
                StockCommand::Register { product_id, quantity }
            }
            StockEvent::QuantityChanged { quantity, .. } => {
                StockCommand::ChangeQuantity { product_id, quantity }
            }
            StockEvent::ProductReserved { quantity, .. } => {
                StockCommand::Reserve { product_id, quantity }
            }
            StockEvent::ProductSold { quantity, .. } => StockCommand::Sell { product_id, quantity },
            StockEvent::ReservationExpired { quantity, .. } => {
                StockCommand::Expire { product_id, quantity }
            }
            StockEvent::ProductRefunded { quantity, .. } => {
                StockCommand::Refund { product_id, quantity }
            }
        }
    }
}

impl Event for StockEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StockEvent::ProductRegistered { .. } => "inventory.product.registered",
            StockEvent::QuantityChanged { .. } => "inventory.product.quantity_changed",
            StockEvent::ProductReserved { .. } => "inventory.product.reserved",
            StockEvent::ProductSold { .. } => "inventory.product.sold",
            StockEvent::ReservationExpired { .. } => "inventory.product.reservation_expired",
            StockEvent::ProductRefunded { .. } => "inventory.product.refunded",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for ProductStock {
    type Command = StockCommand;
    type Event = StockEvent;
    type Error = LedgerError;

    fn apply(&mut self, event: &Self::Event) {
        // `handle` has range-checked every sum; saturation only matters for
        // events that never went through it.
        match *event {
            StockEvent::QuantityChanged { quantity, .. } => self.registered = quantity,
            _ => {
                let deltas = event.deltas();
                self.registered = self.registered.saturating_add(deltas.available.unwrap_or(0));
                self.reserved = self.reserved.saturating_add(deltas.reserved.unwrap_or(0));
                self.sold = self.sold.saturating_add(deltas.sold.unwrap_or(0));
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let product_id = command.product_id().clone();
        let event = match *command {
            StockCommand::Register { quantity, .. } => {
                let registered = self
                    .registered
                    .checked_add(quantity)
                    .ok_or_else(|| LedgerError::overflow("registered total"))?;
                registered
                    .checked_sub(self.committed())
                    .ok_or_else(|| LedgerError::overflow("available quantity"))?;
                StockEvent::ProductRegistered {
                    product_id,
                    quantity,
                }
            }
            StockCommand::ChangeQuantity { quantity, .. } => {
                if quantity < self.committed() {
                    return Err(LedgerError::invalid_quantity(quantity, self.committed()));
                }
                quantity
                    .checked_sub(self.registered)
                    .ok_or_else(|| LedgerError::overflow("quantity change"))?;
                StockEvent::QuantityChanged {
                    product_id,
                    previous: self.registered,
                    quantity,
                }
            }
            StockCommand::Reserve { quantity, .. } => {
                ensure_non_negative(quantity)?;
                if quantity > self.available() {
                    return Err(LedgerError::insufficient_available(
                        quantity,
                        self.available(),
                    ));
                }
                self.reserved
                    .checked_add(quantity)
                    .ok_or_else(|| LedgerError::overflow("reserved total"))?;
                StockEvent::ProductReserved {
                    product_id,
                    quantity,
                }
            }
            StockCommand::Sell { quantity, .. } => {
                self.ensure_reserved(quantity)?;
                self.sold
                    .checked_add(quantity)
                    .ok_or_else(|| LedgerError::overflow("sold total"))?;
                StockEvent::ProductSold {
                    product_id,
                    quantity,
                }
            }
            StockCommand::Expire { quantity, .. } => {
                self.ensure_reserved(quantity)?;
                StockEvent::ReservationExpired {
                    product_id,
                    quantity,
                }
            }
            StockCommand::Refund { quantity, .. } => {
                ensure_non_negative(quantity)?;
                if quantity > self.sold {
                    return Err(LedgerError::insufficient_sold(quantity, self.sold));
                }
                StockEvent::ProductRefunded {
                    product_id,
                    quantity,
                }
            }
        };

        Ok(vec![event])
    }
}

impl ProductStock {
    fn ensure_reserved(&self, quantity: i64) -> Result<(), LedgerError> {
        ensure_non_negative(quantity)?;
        if quantity > self.reserved {
            return Err(LedgerError::insufficient_reserved(quantity, self.reserved));
        }
        Ok(())
    }
}

fn ensure_non_negative(quantity: i64) -> Result<(), LedgerError> {
    if quantity < 0 {
        return Err(LedgerError::negative_quantity(quantity));
    }
    Ok(())
}
