//! # store-models
//!
//! PostgreSQL persistence models for an e-commerce store: users, customers,
//! stores, products, orders and their line items.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use store_models::prelude::*;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new(
//!         "localhost".to_string(), 5432, "shop".to_string(),
//!         "postgres".to_string(), "password".to_string(),
//!         1, 5, 30, 600, 3600,
//!     );
//!
//!     let models = StoreModels::new(&config).await?;
//!     models.migrate_all(false).await?;
//!
//!     let user = models
//!         .users()
//!         .create(User::new("ada", "$argon2id$...", "ada@example.com"))
//!         .await?;
//!     let product = models
//!         .products()
//!         .create(Product::new("Lamp").with_price(Decimal::new(1999, 2)))
//!         .await?;
//!
//!     let mut order = Order::new(user.id);
//!     order.add_order_item(OrderItem::new(0, product.id, 2, Decimal::new(1999, 2)));
//!     order.recalculate_total();
//!
//!     let order = models.orders().create(order).await?;
//!     println!("order {} has {} items", order.id, order.items().len());
//!
//!     Ok(())
//! }
//! ```

// Generated model code refers to `::store_models::...`, which must also
// resolve inside this crate
extern crate self as store_models;

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod migration;
pub mod models;
pub mod orders;
pub mod prelude;

// Re-export the main public types for convenience
pub use core::StoreModels;
pub use errors::StoreModelsError;
pub use orders::OrderStore;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, MigrationConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use store_object;
pub use table_derive;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
