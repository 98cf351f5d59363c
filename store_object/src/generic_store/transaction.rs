//! Transaction support for GenericStore
//!
//! Several model writes can share one transaction through the `*_tx` methods of
//! [`DatabaseExecutor`](crate::traits::DatabaseExecutor).

use super::GenericStore;
use crate::errors::StoreError;
use crate::traits::TableMetadata;
use sqlx::{Postgres, Transaction};
use std::marker::PhantomData;

/// A transactional context for GenericStore operations
///
/// Dropping it without calling `commit` rolls the transaction back.
///
/// # Example
/// ```ignore
/// let mut tx = products.begin_transaction().await?;
/// first.execute_update_tx(tx.as_mut()).await?;
/// second.execute_update_tx(tx.as_mut()).await?;
/// tx.commit().await?;
/// ```
pub struct GenericStoreTransaction<'a, T: TableMetadata> {
    tx: Transaction<'a, Postgres>,
    _phantom: PhantomData<T>,
}

impl<T: TableMetadata> GenericStore<T> {
    pub async fn begin_transaction(&self) -> Result<GenericStoreTransaction<'static, T>, StoreError> {
        let tx = self
            .db_pool
            .begin()
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "begin", e))?;
        Ok(GenericStoreTransaction {
            tx,
            _phantom: PhantomData,
        })
    }
}

impl<'a, T: TableMetadata> GenericStoreTransaction<'a, T> {
    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "commit", e))
    }

    pub async fn rollback(self) -> Result<(), StoreError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "rollback", e))
    }

    /// Mutable access to the underlying transaction for executing queries
    pub fn as_mut(&mut self) -> &mut Transaction<'a, Postgres> {
        &mut self.tx
    }
}
