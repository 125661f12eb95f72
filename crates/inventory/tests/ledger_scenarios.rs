use stockledger_core::{LedgerError, ProductId};
use stockledger_inventory::{Inventory, StockLevels};

fn wroclove() -> ProductId {
    ProductId::from("WROCLOVE2014")
}

fn drugcamp() -> ProductId {
    ProductId::from("DRUGCAMP2015")
}

fn inventory() -> Inventory {
    stockledger_observability::init();
    Inventory::new()
}

#[test]
fn registered_product_starts_fully_available() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();

    assert_eq!(inventory.available_quantity(&wroclove()), 10);
    assert_eq!(inventory.reserved_quantity(&wroclove()), 0);
    assert_eq!(inventory.sold_quantity(&wroclove()), 0);
}

#[test]
fn reserve_then_sell() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 5).unwrap();

    assert_eq!(inventory.available_quantity(&wroclove()), 5);
    assert_eq!(inventory.reserved_quantity(&wroclove()), 5);

    inventory.sell_product(&wroclove(), 5).unwrap();

    assert_eq!(inventory.reserved_quantity(&wroclove()), 0);
    assert_eq!(inventory.sold_quantity(&wroclove()), 5);
    assert_eq!(inventory.available_quantity(&wroclove()), 5);
}

#[test]
fn change_quantity_keeps_reserved_and_sold() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 9).unwrap();
    inventory.reserve_product(&wroclove(), 5).unwrap();
    inventory.sell_product(&wroclove(), 4).unwrap();
    inventory.change_quantity(&wroclove(), 8).unwrap();

    assert_eq!(inventory.reserved_quantity(&wroclove()), 1);
    assert_eq!(inventory.sold_quantity(&wroclove()), 4);
    assert_eq!(inventory.available_quantity(&wroclove()), 3);

    let err = inventory.change_quantity(&wroclove(), 4).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity { .. }));
    assert_eq!(inventory.available_quantity(&wroclove()), 3);
}

#[test]
fn change_quantity_down_to_committed_then_below() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 9).unwrap();
    inventory.reserve_product(&wroclove(), 5).unwrap();
    inventory.sell_product(&wroclove(), 4).unwrap();
    inventory.change_quantity(&wroclove(), 5).unwrap();

    assert_eq!(inventory.available_quantity(&wroclove()), 0);
    assert_eq!(
        inventory.change_quantity(&wroclove(), 4),
        Err(LedgerError::InvalidQuantity {
            requested: 4,
            committed: 5,
        })
    );
}

#[test]
fn cannot_reserve_more_than_available() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 9).unwrap();

    assert_eq!(
        inventory.reserve_product(&wroclove(), 10),
        Err(LedgerError::InsufficientAvailable {
            requested: 10,
            available: 9,
        })
    );

    inventory.reserve_product(&wroclove(), 5).unwrap();
    assert!(matches!(
        inventory.reserve_product(&wroclove(), 5),
        Err(LedgerError::InsufficientAvailable { .. })
    ));

    // Exactly what is left still goes through.
    inventory.reserve_product(&wroclove(), 4).unwrap();
    assert_eq!(inventory.available_quantity(&wroclove()), 0);
}

#[test]
fn cannot_sell_more_than_reserved() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 4).unwrap();

    assert!(matches!(
        inventory.sell_product(&wroclove(), 5),
        Err(LedgerError::InsufficientReserved { .. })
    ));

    inventory.sell_product(&wroclove(), 2).unwrap();
    assert_eq!(
        inventory.sell_product(&wroclove(), 3),
        Err(LedgerError::InsufficientReserved {
            requested: 3,
            reserved: 2,
        })
    );
}

#[test]
fn expired_reservation_returns_to_available() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 4).unwrap();
    inventory.expire_product(&wroclove(), 4).unwrap();

    assert_eq!(inventory.available_quantity(&wroclove()), 10);
    assert_eq!(inventory.reserved_quantity(&wroclove()), 0);

    inventory.reserve_product(&wroclove(), 10).unwrap();
}

#[test]
fn cannot_expire_more_than_reserved() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 3).unwrap();

    assert!(matches!(
        inventory.expire_product(&wroclove(), 4),
        Err(LedgerError::InsufficientReserved { .. })
    ));

    inventory.expire_product(&wroclove(), 1).unwrap();
    assert!(matches!(
        inventory.expire_product(&wroclove(), 3),
        Err(LedgerError::InsufficientReserved { .. })
    ));
}

#[test]
fn refund_returns_sold_units_to_available() {
    let mut inventory = inventory();
    inventory.register_product(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 7).unwrap();
    inventory.sell_product(&wroclove(), 6).unwrap();

    assert_eq!(
        inventory.refund_product(&wroclove(), 7),
        Err(LedgerError::InsufficientSold {
            requested: 7,
            sold: 6,
        })
    );

    inventory.refund_product(&wroclove(), 5).unwrap();
    assert_eq!(
        inventory.levels(&wroclove()),
        StockLevels {
            available: 8,
            reserved: 1,
            sold: 1,
            registered: 10,
        }
    );

    assert!(matches!(
        inventory.refund_product(&wroclove(), 2),
        Err(LedgerError::InsufficientSold { .. })
    ));
}

#[test]
fn multi_product_setup() {
    let mut inventory = inventory();

    inventory.register_product(&wroclove(), 9).unwrap();
    inventory.change_quantity(&wroclove(), 10).unwrap();
    inventory.reserve_product(&wroclove(), 8).unwrap();
    inventory.sell_product(&wroclove(), 6).unwrap();
    inventory.refund_product(&wroclove(), 4).unwrap();
    inventory.expire_product(&wroclove(), 1).unwrap();

    inventory.register_product(&drugcamp(), 90).unwrap();
    inventory.change_quantity(&drugcamp(), 100).unwrap();
    inventory.reserve_product(&drugcamp(), 80).unwrap();
    inventory.sell_product(&drugcamp(), 60).unwrap();
    inventory.refund_product(&drugcamp(), 40).unwrap();
    inventory.expire_product(&drugcamp(), 10).unwrap();

    assert_eq!(inventory.reserved_quantity(&wroclove()), 1);
    assert_eq!(inventory.sold_quantity(&wroclove()), 2);
    assert_eq!(inventory.available_quantity(&wroclove()), 7);

    assert_eq!(inventory.reserved_quantity(&drugcamp()), 10);
    assert_eq!(inventory.sold_quantity(&drugcamp()), 20);
    assert_eq!(inventory.available_quantity(&drugcamp()), 70);

    let rebuilt = Inventory::replay(inventory.journal().to_vec()).unwrap();
    assert_eq!(rebuilt, inventory);
}
