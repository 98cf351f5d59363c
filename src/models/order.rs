use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use table_derive::model;
use thiserror::Error;

use super::{OrderItem, UNSAVED_ID};

/// Order lifecycle state, stored as its upper-case name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Received, awaiting payment or processing
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Returned => "RETURNED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseOrderStatusError(s.to_string()))
    }
}

impl sqlx::Type<sqlx::Postgres> for OrderStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl sqlx::Encode<'_, sqlx::Postgres> for OrderStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

/// An order and, when loaded through `OrderStore`, its items
///
/// `items` is not a column. `total_amount` is stored as given; call
/// [`Order::recalculate_total`] to derive it from the items.
#[model]
#[table(name = "orders", auto_increment)]
pub struct Order {
    #[primary_key]
    pub id: i64,

    #[field(create)]
    #[foreign_key(references = "users")]
    pub user_id: i64,

    #[field(create)]
    #[column(default = "NOW()")]
    pub order_date: DateTime<Utc>,

    #[field(create, update)]
    #[index]
    #[column(default = "'PENDING'")]
    pub status: OrderStatus,

    #[field(create, update)]
    #[column(default = "0")]
    pub total_amount: Decimal,

    #[field(create, update)]
    #[column(text)]
    pub shipping_address: Option<String>,

    #[field(create, update)]
    #[column(text)]
    pub billing_address: Option<String>,

    #[field(create, update)]
    pub payment_method: Option<String>,

    /// Free-form payment state, e.g. PENDING, COMPLETED, FAILED
    #[field(create, update)]
    pub payment_status: Option<String>,

    #[field(create, update)]
    #[column(text)]
    pub notes: Option<String>,

    #[has_many]
    pub items: Vec<OrderItem>,

    #[field(readonly)]
    #[created_at]
    pub created_at: DateTime<Utc>,

    #[field(readonly)]
    #[updated_at]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: UNSAVED_ID,
            user_id,
            order_date: now,
            status: OrderStatus::Pending,
            total_amount: Decimal::ZERO,
            shipping_address: None,
            billing_address: None,
            payment_method: None,
            payment_status: None,
            notes: None,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_shipping_address(mut self, address: impl Into<String>) -> Self {
        self.shipping_address = Some(address.into());
        self
    }

    pub fn with_billing_address(mut self, address: impl Into<String>) -> Self {
        self.billing_address = Some(address.into());
        self
    }

    pub fn with_payment(mut self, method: impl Into<String>, status: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self.payment_status = Some(status.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Append `item` and point its back-link at this order.
    /// On an unsaved order the link is `Some(UNSAVED_ID)` until
    /// `OrderStore::create` replaces it with the generated id.
    pub fn add_order_item(&mut self, mut item: OrderItem) {
        item.order_id = Some(self.id);
        self.items.push(item);
    }

    /// Remove the first item equal to `item` and return it detached.
    /// `None` when no such item belongs to this order.
    pub fn remove_order_item(&mut self, item: &OrderItem) -> Option<OrderItem> {
        let index = self.items.iter().position(|candidate| candidate == item)?;
        let mut removed = self.items.remove(index);
        removed.order_id = None;
        Some(removed)
    }

    /// Position for the next appended line, capped at `i32::MAX`
    pub fn next_position(&self) -> i32 {
        self.items
            .iter()
            .map(|item| item.position.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    pub fn items_subtotal(&self) -> Decimal {
        self.items.iter().map(|item| item.subtotal).sum()
    }

    /// Set `total_amount` to the sum of item subtotals and return it
    pub fn recalculate_total(&mut self) -> Decimal {
        self.total_amount = self.items_subtotal();
        self.total_amount
    }
}
