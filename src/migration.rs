//! Database migration functionality
//!
//! Creates tables, indexes and `updated_at` triggers straight from model
//! metadata. There is no versioned migration history; statements are written
//! to be safe to run again.

use crate::core::StoreModels;
use crate::errors::StoreModelsError;
use crate::models::{Customer, Order, OrderItem, OrderProductItem, Product, Store, User};
use store_object::schema;
use store_object::traits::TableMetadata;

/// Every table in foreign-key dependency order: a table comes after the
/// tables it references
pub fn table_names() -> [&'static str; 7] {
    [
        User::table_name(),
        Customer::table_name(),
        Store::table_name(),
        Product::table_name(),
        Order::table_name(),
        OrderItem::table_name(),
        OrderProductItem::table_name(),
    ]
}

/// Every DDL statement `auto_migrate::<T>` runs, in order, without touching a database
pub fn migration_statements<T: TableMetadata>(recreate: bool) -> Vec<String> {
    let mut statements = Vec::new();

    if recreate {
        statements.push(T::drop_table_sql());
    }
    statements.push(T::create_table_sql());
    if let Some(updated_at) = T::updated_at_field() {
        statements.extend(schema::updated_at_trigger_sql(T::table_name(), updated_at));
    }
    statements.extend(T::create_indexes_sql());

    statements
}

impl StoreModels {
    /// Automatically create table, indexes and `updated_at` trigger for a model.
    /// If recreate is true, drops the existing table first.
    pub async fn auto_migrate<T>(&self, recreate: bool) -> Result<(), StoreModelsError>
    where
        T: TableMetadata,
    {
        for sql in migration_statements::<T>(recreate) {
            tracing::info!(table = T::table_name(), %sql, "migrating");
            sqlx::query(&sql).execute(self.pool()).await?;
        }
        Ok(())
    }

    /// Migrate every model, parents before children
    pub async fn migrate_all(&self, recreate: bool) -> Result<(), StoreModelsError> {
        if recreate {
            self.drop_all().await?;
        }
        self.auto_migrate::<User>(false).await?;
        self.auto_migrate::<Customer>(false).await?;
        self.auto_migrate::<Store>(false).await?;
        self.auto_migrate::<Product>(false).await?;
        self.auto_migrate::<Order>(false).await?;
        self.auto_migrate::<OrderItem>(false).await?;
        self.auto_migrate::<OrderProductItem>(false).await?;
        Ok(())
    }

    /// Drop every model table, children before parents
    pub async fn drop_all(&self) -> Result<(), StoreModelsError> {
        for table in table_names().into_iter().rev() {
            let sql = schema::drop_table_sql(table);
            tracing::info!(table, %sql, "dropping");
            sqlx::query(&sql).execute(self.pool()).await?;
        }
        Ok(())
    }
}
