use rust_decimal::Decimal;
use table_derive::model;

use super::{round_money, UNSAVED_ID};

/// One line of an order
///
/// `order_id` is the back-link to the owning [`Order`](super::Order). It is
/// `None` while the item is detached and `Some(UNSAVED_ID)` while the owning
/// order has not been inserted. Neither can be stored on its own: the column
/// is NOT NULL and references `orders`. `OrderStore::create` and
/// `OrderStore::save` set the real id. Use `Order::add_order_item` and
/// `Order::remove_order_item` rather than setting it by hand.
///
/// Money is stored as `NUMERIC(19,4)`, so `new` rounds the unit price to
/// [`MONEY_SCALE`](super::MONEY_SCALE) places before computing the subtotal.
#[model]
#[table(name = "order_items", auto_increment)]
#[derive(PartialEq)]
pub struct OrderItem {
    #[primary_key]
    pub id: i64,

    /// Line number within the order
    #[field(create, update)]
    pub position: i32,

    #[field(create, update)]
    #[column(not_null)]
    #[foreign_key(references = "orders", on_delete = "cascade")]
    pub order_id: Option<i64>,

    #[field(create)]
    #[foreign_key(references = "products")]
    pub product_id: i64,

    #[field(create)]
    pub quantity: i32,

    /// Unit price when the order was placed
    #[field(create)]
    pub price_at_purchase: Decimal,

    #[field(create)]
    pub subtotal: Decimal,
}

impl OrderItem {
    /// Detached item with `subtotal = price_at_purchase * quantity`
    pub fn new(position: i32, product_id: i64, quantity: i32, price_at_purchase: Decimal) -> Self {
        let price_at_purchase = round_money(price_at_purchase);
        Self {
            id: UNSAVED_ID,
            position,
            order_id: None,
            product_id,
            quantity,
            price_at_purchase,
            subtotal: price_at_purchase * Decimal::from(quantity),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_ID
    }
}
