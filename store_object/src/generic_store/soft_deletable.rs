use super::core::GenericStore;
use crate::errors::StoreError;
use crate::traits::{DatabaseExecutor, SoftDeletable, TableMetadata};
use async_trait::async_trait;
use sqlx::Row;
use type_mapping::quote_identifier;

impl<T: TableMetadata> GenericStore<T> {
    fn soft_delete_column() -> Result<&'static str, StoreError> {
        T::soft_delete_field().ok_or_else(|| {
            StoreError::validation(
                T::table_name(),
                "soft_delete",
                "Entity does not support soft deletion",
            )
        })
    }
}

#[async_trait]
impl<T> SoftDeletable for GenericStore<T>
where
    T: DatabaseExecutor,
{
    async fn list_active(&self) -> Result<Vec<Self::Model>, StoreError> {
        let column = Self::soft_delete_column()?;

        let sql = format!(
            "{} WHERE {} = TRUE{}",
            T::select_base_sql(),
            quote_identifier(column),
            Self::order_by_clause()
        );
        sqlx::query_as::<_, T>(&sql)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "list_active", e))
    }

    async fn set_active(&self, id: &Self::Id, is_active: bool) -> Result<bool, StoreError> {
        let column = Self::soft_delete_column()?;

        let mut assignments = format!("{} = $1", quote_identifier(column));
        if let Some(updated_at) = T::updated_at_field() {
            assignments.push_str(&format!(", {} = NOW()", quote_identifier(updated_at)));
        }
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = $2",
            quote_identifier(T::table_name()),
            assignments,
            quote_identifier(T::primary_key_field())
        );

        let result = sqlx::query(&sql)
            .bind(is_active)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "set_active", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self) -> Result<i64, StoreError> {
        let column = Self::soft_delete_column()?;

        let sql = format!(
            "SELECT COUNT(*) AS total FROM {} WHERE {} = TRUE",
            quote_identifier(T::table_name()),
            quote_identifier(column)
        );
        let row = sqlx::query(&sql)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "count_active", e))?;

        row.try_get("total")
            .map_err(|e| StoreError::database_operation(T::table_name(), "count_active", e))
    }
}
