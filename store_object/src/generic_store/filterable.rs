use super::core::GenericStore;
use crate::errors::StoreError;
use crate::traits::{DatabaseExecutor, Filterable, StoreFilter, TableMetadata};
use async_trait::async_trait;
use sqlx::Row;
use type_mapping::{quote_identifier, PostgresValue};

/// Bind filter values in placeholder order, each with its native type.
/// Works for both `query` and `query_as` since both expose `bind`.
macro_rules! bind_filter_values {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                PostgresValue::Text(v) => query.bind(v),
                PostgresValue::SmallInt(v) => query.bind(v),
                PostgresValue::Integer(v) => query.bind(v),
                PostgresValue::BigInt(v) => query.bind(v),
                PostgresValue::Boolean(v) => query.bind(v),
                PostgresValue::Decimal(v) => query.bind(v),
                PostgresValue::Timestamp(v) => query.bind(v),
                // rendered as IS NULL, no placeholder
                PostgresValue::Null => query,
            };
        }
        query
    }};
}

impl<T: TableMetadata> GenericStore<T> {
    /// Resolve a filter into a WHERE clause, rejecting columns this table does not have
    fn where_clause(
        filter: &StoreFilter,
        operation: &str,
    ) -> Result<(String, Vec<PostgresValue>), StoreError> {
        if let Some(unknown) = filter.fields().find(|field| !T::has_column(field)) {
            return Err(StoreError::validation(
                T::table_name(),
                unknown,
                format!("unknown column in {} filter", operation),
            ));
        }

        filter.build_where_clause().map_err(|e| {
            StoreError::validation(T::table_name(), "filter", e.to_string())
        })
    }
}

#[async_trait]
impl<T> Filterable for GenericStore<T>
where
    T: DatabaseExecutor,
{
    async fn list_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Self::Model>, StoreError> {
        let (where_clause, values) = Self::where_clause(filter, "list_by_filter")?;

        let sql = format!(
            "{}{}{}",
            T::select_base_sql(),
            where_clause,
            Self::order_by_clause()
        );
        crate::trace_log!(table = T::table_name(), sql = %sql, "list_by_filter");

        bind_filter_values!(sqlx::query_as::<sqlx::Postgres, T>(&sql), values)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "list_by_filter", e))
    }

    async fn count_by_filter(&self, filter: &StoreFilter) -> Result<i64, StoreError> {
        let (where_clause, values) = Self::where_clause(filter, "count_by_filter")?;

        let sql = format!(
            "SELECT COUNT(*) AS total FROM {}{}",
            quote_identifier(T::table_name()),
            where_clause
        );

        let row = bind_filter_values!(sqlx::query::<sqlx::Postgres>(&sql), values)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(T::table_name(), "count_by_filter", e))?;

        row.try_get("total")
            .map_err(|e| StoreError::database_operation(T::table_name(), "count_by_filter", e))
    }
}
