//! Entity models
//!
//! One struct per table. Every struct goes through `#[model]`, which derives
//! the serde/sqlx plumbing and the table metadata used for CRUD and DDL.
//! An `id` of 0 marks a row that has not been inserted yet.

pub mod customer;
pub mod order;
pub mod order_item;
pub mod order_product_item;
pub mod product;
pub mod store;
pub mod user;

pub use customer::Customer;
pub use order::{Order, OrderStatus, ParseOrderStatusError};
pub use order_item::OrderItem;
pub use order_product_item::OrderProductItem;
pub use product::Product;
pub use store::Store;
pub use user::User;

use rust_decimal::{Decimal, RoundingStrategy};

/// Id carried by a model before the database has assigned one
pub const UNSAVED_ID: i64 = 0;

/// Decimal places kept by money columns (`NUMERIC(19,4)`)
pub const MONEY_SCALE: u32 = 4;

/// Round to [`MONEY_SCALE`] places the way PostgreSQL does on insert
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
