//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::{
    DatabaseExecutor, Filterable, SoftDeletable, StoreFilter, StoreObject, TableMetadata,
};

// Error types
pub use crate::errors::StoreError;

// Core store functionality
pub use crate::generic_store::{GenericStore, GenericStoreTransaction};

// Filter values
pub use type_mapping::PostgresValue;

// Validation
pub use crate::validation::{ValidatedFieldName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::{FromRow, PgPool, Row};
