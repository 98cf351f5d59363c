//! Error types for the store-models crate
//!
//! Store-level failures (constraint violations, missing rows) come from
//! `store_object::StoreError`; this type adds connection and configuration
//! failures on top.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreModelsError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error(transparent)]
    Store(#[from] store_object::StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl StoreModelsError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreModelsError::Store(e) if e.is_unique_violation())
    }
}
