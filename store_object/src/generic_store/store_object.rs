use super::core::GenericStore;
use crate::errors::StoreError;
use crate::traits::{DatabaseExecutor, StoreObject};
use async_trait::async_trait;
use sqlx::Row;

#[async_trait]
impl<T> StoreObject for GenericStore<T>
where
    T: DatabaseExecutor,
{
    type Model = T;
    type Id = T::Id;

    async fn create(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        let created = data.execute_create(&self.db_pool).await?;
        crate::trace_log!(table = T::table_name(), id = %created.extract_id(), "created");
        Ok(created)
    }

    async fn get_by_id(&self, id: &Self::Id) -> Result<Option<Self::Model>, StoreError> {
        sqlx::query_as::<_, T>(T::get_by_id_sql())
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "get_by_id", e))
    }

    async fn get_existing(&self, id: &Self::Id) -> Result<Self::Model, StoreError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(T::table_name(), id))
    }

    async fn list_all(&self) -> Result<Vec<Self::Model>, StoreError> {
        sqlx::query_as::<_, T>(T::list_all_sql())
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "list_all", e))
    }

    async fn update(&self, data: Self::Model) -> Result<Self::Model, StoreError> {
        match data.execute_update(&self.db_pool).await {
            Err(StoreError::Database {
                source: sqlx::Error::RowNotFound,
                ..
            }) => Err(StoreError::not_found(T::table_name(), data.extract_id())),
            other => other,
        }
    }

    async fn update_many(&self, updates: Vec<Self::Model>) -> Result<Vec<Self::Model>, StoreError> {
        let mut results = Vec::with_capacity(updates.len());

        let mut tx = self.begin_transaction().await?;

        for data in updates {
            let updated = match data.execute_update_tx(tx.as_mut()).await {
                Err(StoreError::Database {
                    source: sqlx::Error::RowNotFound,
                    ..
                }) => return Err(StoreError::not_found(T::table_name(), data.extract_id())),
                other => other?,
            };
            results.push(updated);
        }

        tx.commit().await?;

        crate::debug_log!(table = T::table_name(), count = results.len(), "batch updated");
        Ok(results)
    }

    async fn delete(&self, id: &Self::Id) -> Result<bool, StoreError> {
        let result = sqlx::query(T::delete_by_id_sql())
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: Vec<Self::Id>) -> Result<Vec<Self::Id>, StoreError> {
        let mut deleted_ids = Vec::new();

        let mut tx = self.begin_transaction().await?;

        for id in ids {
            let result = sqlx::query(T::delete_by_id_sql())
                .bind(&id)
                .execute(&mut **tx.as_mut())
                .await
                .map_err(|e| StoreError::database_operation(T::table_name(), "delete_many", e))?;

            if result.rows_affected() > 0 {
                deleted_ids.push(id);
            }
        }

        tx.commit().await?;

        crate::debug_log!(table = T::table_name(), count = deleted_ids.len(), "batch deleted");
        Ok(deleted_ids)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let row = sqlx::query(T::count_all_sql())
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "count", e))?;

        row.try_get("total")
            .map_err(|e| StoreError::database_operation(T::table_name(), "count", e))
    }
}
