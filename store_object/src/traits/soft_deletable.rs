use super::core::StoreObject;
use crate::StoreError;
use async_trait::async_trait;

/// Trait for objects with an active flag (field marked with #[soft_delete])
#[async_trait]
pub trait SoftDeletable: StoreObject {
    /// List only active objects
    async fn list_active(&self) -> Result<Vec<Self::Model>, StoreError>;

    /// Set active status for an object
    async fn set_active(&self, id: &Self::Id, is_active: bool) -> Result<bool, StoreError>;

    /// Count active objects
    async fn count_active(&self) -> Result<i64, StoreError>;
}
