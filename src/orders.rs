//! Order aggregate persistence
//!
//! An [`Order`] owns its [`OrderItem`]s: they are written with the order,
//! loaded with it, and deleted with it. Items dropped from `Order::items` are
//! deleted from the database on the next [`OrderStore::save`].

use sqlx::PgPool;
use store_object::prelude::*;

use crate::models::{Order, OrderItem, UNSAVED_ID};

/// Turn a failed single-row UPDATE into `NotFound`
fn missing_row_as_not_found<T>(
    result: Result<T, StoreError>,
    table: &str,
    id: i64,
) -> Result<T, StoreError> {
    match result {
        Err(StoreError::Database {
            source: sqlx::Error::RowNotFound,
            ..
        }) => Err(StoreError::not_found(table, id)),
        other => other,
    }
}

#[derive(Clone, Debug)]
pub struct OrderStore {
    orders: GenericStore<Order>,
    items: GenericStore<OrderItem>,
}

impl OrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            orders: GenericStore::new(pool.clone()),
            items: GenericStore::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.orders.pool()
    }

    /// Row-level access to `orders`, bypassing the items
    pub fn order_rows(&self) -> &GenericStore<Order> {
        &self.orders
    }

    /// Row-level access to `order_items`
    pub fn item_rows(&self) -> &GenericStore<OrderItem> {
        &self.items
    }

    /// Insert the order and all of its items in one transaction.
    /// Items are linked to the generated order id.
    pub async fn create(&self, order: Order) -> Result<Order, StoreError> {
        let mut tx = self.orders.begin_transaction().await?;

        let mut created = order.execute_create_tx(tx.as_mut()).await?;

        let mut items = Vec::with_capacity(order.items.len());
        for mut item in order.items {
            item.order_id = Some(created.id);
            items.push(item.execute_create_tx(tx.as_mut()).await?);
        }
        created.items = items;

        tx.commit().await?;

        crate::debug_log!(order_id = created.id, items = created.items.len(), "order created");
        Ok(created)
    }

    /// Load an order with its items sorted by position
    pub async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let Some(mut order) = self.orders.get_by_id(&id).await? else {
            return Ok(None);
        };
        order.items = self.items_for(id).await?;
        Ok(Some(order))
    }

    pub async fn get_existing(&self, id: i64) -> Result<Order, StoreError> {
        self.get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(Order::table_name(), id))
    }

    pub async fn items_for(&self, order_id: i64) -> Result<Vec<OrderItem>, StoreError> {
        let sql = format!(
            r#"{} WHERE "order_id" = $1 ORDER BY "position", "id""#,
            OrderItem::select_base_sql()
        );
        sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(self.pool())
            .await
            .map_err(|e| StoreError::database_operation(OrderItem::table_name(), "items_for", e))
    }

    /// Write the order and reconcile its items in one transaction.
    ///
    /// Persisted items missing from `order.items` are deleted, new items are
    /// inserted and kept items get their position and order link updated.
    /// An order that was never inserted is created instead.
    pub async fn save(&self, order: Order) -> Result<Order, StoreError> {
        if order.id == UNSAVED_ID {
            return self.create(order).await;
        }

        let mut tx = self.orders.begin_transaction().await?;

        let mut updated = missing_row_as_not_found(
            order.execute_update_tx(tx.as_mut()).await,
            Order::table_name(),
            order.id,
        )?;

        let kept_ids: Vec<i64> = order
            .items
            .iter()
            .filter(|item| item.is_persisted())
            .map(|item| item.id)
            .collect();

        let orphans = sqlx::query(
            r#"DELETE FROM "order_items" WHERE "order_id" = $1 AND NOT ("id" = ANY($2))"#,
        )
        .bind(order.id)
        .bind(&kept_ids)
        .execute(&mut **tx.as_mut())
        .await
        .map_err(|e| StoreError::database_operation(OrderItem::table_name(), "orphan_removal", e))?;

        let mut items = Vec::with_capacity(order.items.len());
        for mut item in order.items {
            item.order_id = Some(order.id);
            let saved = if item.is_persisted() {
                missing_row_as_not_found(
                    item.execute_update_tx(tx.as_mut()).await,
                    OrderItem::table_name(),
                    item.id,
                )?
            } else {
                item.execute_create_tx(tx.as_mut()).await?
            };
            items.push(saved);
        }
        updated.items = items;

        tx.commit().await?;

        tracing::debug!(
            order_id = updated.id,
            items = updated.items.len(),
            removed = orphans.rows_affected(),
            "order saved"
        );

        Ok(updated)
    }

    /// Delete the order; its items go with it through `ON DELETE CASCADE`
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.orders.delete(&id).await
    }

    /// A user's orders, newest first, without items
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Order>, StoreError> {
        self.orders
            .list_by_filter(&StoreFilter::new().eq("user_id", user_id))
            .await
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, StoreError> {
        self.orders
            .count_by_filter(&StoreFilter::new().eq("user_id", user_id))
            .await
    }
}
