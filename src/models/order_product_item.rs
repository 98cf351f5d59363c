use table_derive::model;

use super::UNSAVED_ID;

/// Placeholder table with no columns besides its generated key
#[model]
#[table(name = "order_product_items", auto_increment)]
pub struct OrderProductItem {
    #[primary_key]
    pub id: i64,
}

impl OrderProductItem {
    pub fn new() -> Self {
        Self { id: UNSAVED_ID }
    }
}

impl Default for OrderProductItem {
    fn default() -> Self {
        Self::new()
    }
}
