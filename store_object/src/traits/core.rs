//! Trait definitions
//!
//! This module defines core traits for database operations.

use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait that defines common database operations for all entities
#[async_trait]
pub trait StoreObject: Clone + Send + Sync + Debug {
    /// The model type that this object represents
    type Model: Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>;

    /// The ID type used for this object
    type Id: Clone + Send + Sync + Debug;

    /// Insert a new record and return it as stored
    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Get an object by its ID
    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, StoreError>;

    /// Like `get_by_id`, but a missing row is an error
    async fn get_existing(&self, id: &Self::Id) -> Result<Self::Model, StoreError>;

    /// List all objects of this type
    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError>;

    /// Write the updatable columns of `data` to the row with the same id
    async fn update(&self, data: Self::Model) -> Result<Self::Model, StoreError>;

    /// Update several records in one transaction
    async fn update_many(&self, updates: Vec<Self::Model>) -> Result<Vec<Self::Model>, StoreError>;

    /// Delete an object by its ID
    async fn delete(&self, id: &Self::Id) -> Result<bool, StoreError>;

    /// Delete several records in one transaction, returning the ids that existed
    async fn delete_many(&self, ids: Vec<Self::Id>) -> Result<Vec<Self::Id>, StoreError>;

    /// Count total objects of this type
    async fn count(&self) -> Result<i64, StoreError>;

    async fn exists(&self, id: &Self::Id) -> Result<bool, StoreError> {
        Ok(self.get_by_id(id).await?.is_some())
    }
}
