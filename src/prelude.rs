//! Convenience re-exports for common store-models usage
//!
//! # Example
//!
//! ```rust
//! use store_models::prelude::*;
//!
//! let order = Order::new(1).with_status(OrderStatus::Processing);
//! assert_eq!(order.status.as_str(), "PROCESSING");
//! ```

// Core components
pub use crate::core::StoreModels;
pub use crate::errors::StoreModelsError;
pub use crate::migration;
pub use crate::orders::OrderStore;

// Entities
pub use crate::models::{
    Customer, Order, OrderItem, OrderProductItem, OrderStatus, Product, Store, User,
};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, MigrationConfig};

// Re-export commonly used store-object types for convenience
pub use store_object::prelude::*;

// Re-export store_object module for macro-generated code
pub use store_object;

// Re-export table derive for model creation
pub use table_derive::{TableMetadata, model};

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{Postgres, Transaction};
