//! Table metadata and statement execution traits
//!
//! Both traits are implemented by the `#[model]` derive; nothing here is meant
//! to be implemented by hand.

use crate::errors::StoreError;
use crate::schema::{self, ColumnDef, IndexDef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Metadata about database table structure and operations
///
/// ```ignore
/// use store_models::prelude::*;
///
/// #[model]
/// #[table(name = "products", auto_increment)]
/// pub struct Product {
///     #[primary_key]
///     pub id: i64,
///
///     #[field(create, update)]
///     #[unique]
///     pub sku: Option<String>,
/// }
/// ```
pub trait TableMetadata:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// The type used for the primary key
    type Id: Clone
        + Send
        + Sync
        + Debug
        + Display
        + Unpin
        + for<'q> sqlx::Encode<'q, sqlx::Postgres>
        + for<'r> sqlx::Decode<'r, sqlx::Postgres>
        + sqlx::Type<sqlx::Postgres>;

    /// The table name in the database
    fn table_name() -> &'static str;

    /// Get the primary key field name
    fn primary_key_field() -> &'static str;

    /// Extract ID from model instance
    fn extract_id(&self) -> Self::Id;

    /// Every mapped column in declaration order
    fn columns() -> &'static [ColumnDef];

    /// Secondary indexes (single-column, foreign key and composite)
    fn indexes() -> &'static [IndexDef];

    /// Columns bound by `create_sql`, in placeholder order
    fn create_fields() -> &'static [&'static str];

    /// Columns bound by `update_sql`, in placeholder order
    fn update_fields() -> &'static [&'static str];

    /// Get the name of the soft delete field if it exists
    fn soft_delete_field() -> Option<&'static str> {
        None
    }

    /// Whether this entity supports soft deletion
    fn supports_soft_delete() -> bool {
        Self::soft_delete_field().is_some()
    }

    fn created_at_field() -> Option<&'static str> {
        None
    }

    fn updated_at_field() -> Option<&'static str> {
        None
    }

    /// SQL for CREATE operation (with placeholders)
    fn create_sql() -> &'static str;

    /// SQL for UPDATE operation (with placeholders); empty when no column is updatable
    fn update_sql() -> &'static str;

    fn get_by_id_sql() -> &'static str;

    fn list_all_sql() -> &'static str;

    fn delete_by_id_sql() -> &'static str;

    /// Counts into a column named `total`
    fn count_all_sql() -> &'static str;

    fn select_base_sql() -> &'static str;

    fn has_column(name: &str) -> bool {
        Self::columns().iter().any(|c| c.name == name)
    }

    /// Generate CREATE TABLE SQL statement
    fn create_table_sql() -> String {
        schema::create_table_sql(Self::table_name(), Self::columns())
    }

    /// Generate CREATE INDEX SQL statements
    fn create_indexes_sql() -> Vec<String> {
        schema::create_indexes_sql(Self::table_name(), Self::indexes())
    }

    /// Generate DROP TABLE SQL statement
    fn drop_table_sql() -> String {
        schema::drop_table_sql(Self::table_name())
    }
}

/// Runs the generated INSERT and UPDATE statements, binding the model's fields
#[async_trait]
pub trait DatabaseExecutor:
    TableMetadata + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Unpin
{
    /// Insert and return the stored row (generated id and defaults included)
    async fn execute_create(&self, pool: &sqlx::PgPool) -> Result<Self, StoreError>;

    async fn execute_create_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Self, StoreError>;

    /// Update the row matching this model's id and return it
    async fn execute_update(&self, pool: &sqlx::PgPool) -> Result<Self, StoreError>;

    async fn execute_update_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<Self, StoreError>;
}
