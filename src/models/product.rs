use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use table_derive::model;

use super::UNSAVED_ID;

#[model]
#[table(name = "products", auto_increment)]
pub struct Product {
    #[primary_key]
    pub id: i64,

    #[field(create, update)]
    pub name: String,

    #[field(create, update)]
    #[column(text)]
    pub description: Option<String>,

    #[field(create, update)]
    pub price: Option<Decimal>,

    #[field(create, update)]
    #[unique]
    pub sku: Option<String>,

    /// Units in stock
    #[field(create, update)]
    pub quantity: Option<i32>,

    #[field(create, update)]
    #[index]
    pub category: Option<String>,

    #[field(create, update)]
    pub image_url: Option<String>,

    #[field(readonly)]
    #[created_at]
    pub created_at: DateTime<Utc>,

    #[field(readonly)]
    #[updated_at]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: None,
            price: None,
            sku: None,
            quantity: None,
            category: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Unit price, rounded to [`MONEY_SCALE`](super::MONEY_SCALE) places
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(super::round_money(price));
        self
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}
