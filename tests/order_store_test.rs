//! Integration tests against a live PostgreSQL database
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.
//! Tables are created once per test binary and never dropped, so rows use
//! unique names to stay independent of each other.

use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;
use sqlx::PgPool;
use store_models::prelude::*;
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<()> = OnceCell::const_new();
static COUNTER: AtomicUsize = AtomicUsize::new(0);

async fn setup() -> StoreModels {
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    let models = StoreModels::from_pool(pool);

    MIGRATED
        .get_or_init(|| async {
            models.migrate_all(false).await.expect("Failed to migrate");
        })
        .await;

    models
}

fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}-{}", prefix, nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

async fn create_user(models: &StoreModels) -> User {
    let name = unique("user");
    models
        .users()
        .create(User::new(&name, "hash", format!("{}@example.com", name)))
        .await
        .expect("Failed to create user")
}

async fn create_product(models: &StoreModels, price: Decimal) -> Product {
    models
        .products()
        .create(Product::new("Desk lamp").with_price(price).with_sku(unique("sku")))
        .await
        .expect("Failed to create product")
}

async fn order_with_two_items(models: &StoreModels) -> Order {
    let user = create_user(models).await;
    let lamp = create_product(models, Decimal::new(1999, 2)).await;
    let bulb = create_product(models, Decimal::new(250, 2)).await;

    let mut order = Order::new(user.id).with_shipping_address("1 Main St");
    order.add_order_item(OrderItem::new(0, lamp.id, 1, Decimal::new(1999, 2)));
    order.add_order_item(OrderItem::new(1, bulb.id, 4, Decimal::new(250, 2)));
    order.recalculate_total();

    models.orders().create(order).await.expect("Failed to create order")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_sku_is_a_unique_violation() {
    let models = setup().await;

    let sku = unique("sku");
    models
        .products()
        .create(Product::new("Chair").with_sku(&sku))
        .await
        .expect("first insert should succeed");

    let err = models
        .products()
        .create(Product::new("Other chair").with_sku(&sku))
        .await
        .unwrap_err();

    assert!(err.is_unique_violation(), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn create_links_items_to_generated_order_id() {
    let models = setup().await;

    let order = order_with_two_items(&models).await;
    assert_ne!(order.id, 0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, Decimal::new(2999, 2));
    assert!(order.items().iter().all(|item| item.order_id == Some(order.id)));
    assert!(order.items().iter().all(|item| item.is_persisted()));

    let loaded = models.orders().get_existing(order.id).await.unwrap();
    let positions: Vec<i32> = loaded.items().iter().map(|item| item.position).collect();
    assert_eq!(positions, [0, 1]);
    assert_eq!(loaded.items_subtotal(), Decimal::new(2999, 2));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deleting_an_order_deletes_its_items() {
    let models = setup().await;

    let order = order_with_two_items(&models).await;
    let item_ids: Vec<i64> = order.items().iter().map(|item| item.id).collect();

    assert!(models.orders().delete(order.id).await.unwrap());
    assert!(models.orders().get(order.id).await.unwrap().is_none());
    for id in item_ids {
        assert!(!models.orders().item_rows().exists(&id).await.unwrap());
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn removed_items_are_deleted_on_save() {
    let models = setup().await;

    let mut order = order_with_two_items(&models).await;
    let first = order.items()[0].clone();
    let removed = order.remove_order_item(&first).unwrap();
    assert_eq!(removed.order_id, None);

    order.recalculate_total();
    let saved = models.orders().save(order).await.unwrap();

    assert_eq!(saved.items().len(), 1);
    assert_eq!(saved.total_amount, Decimal::new(1000, 2));
    assert!(!models.orders().item_rows().exists(&removed.id).await.unwrap());

    let reloaded = models.orders().items_for(saved.id).await.unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].id, saved.items()[0].id);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn save_inserts_new_items_and_updates_status() {
    let models = setup().await;

    let mut order = order_with_two_items(&models).await;
    let product = create_product(&models, Decimal::new(500, 2)).await;
    let position = order.next_position();
    order.add_order_item(OrderItem::new(position, product.id, 1, Decimal::new(500, 2)));
    order.status = OrderStatus::Processing;

    let saved = models.orders().save(order).await.unwrap();
    assert_eq!(saved.status, OrderStatus::Processing);
    assert_eq!(saved.items().len(), 3);
    assert!(saved.items()[2].is_persisted());

    let loaded = models.orders().get_existing(saved.id).await.unwrap();
    assert_eq!(loaded.items().len(), 3);
    assert_eq!(loaded.status, OrderStatus::Processing);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn orders_are_filtered_by_user() {
    let models = setup().await;

    let order = order_with_two_items(&models).await;
    let orders = models.orders().list_for_user(order.user_id).await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order.id);
    assert!(orders[0].items().is_empty());
    assert_eq!(models.orders().count_for_user(order.user_id).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn order_for_unknown_user_is_a_foreign_key_violation() {
    let models = setup().await;

    let err = models.orders().create(Order::new(-1)).await.unwrap_err();
    assert!(err.is_foreign_key_violation(), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn deactivated_stores_drop_out_of_active_lists() {
    let models = setup().await;
    let stores = models.stores();

    let store = stores
        .create(Store::new(unique("store")).with_description("Lamps and more"))
        .await
        .unwrap();
    assert!(store.is_active);

    assert!(stores.set_active(&store.id, false).await.unwrap());
    let active = stores.list_active().await.unwrap();
    assert!(active.iter().all(|s| s.id != store.id));

    let reloaded = stores.get_existing(&store.id).await.unwrap();
    assert!(!reloaded.is_active);
    assert!(reloaded.updated_at >= store.updated_at);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn customers_keep_their_supplied_id() {
    let models = setup().await;
    let customers = models.customers();

    let id = chrono::Utc::now().timestamp_micros();
    let created = customers
        .create(Customer::new(id, "C-001").with_name("Acme"))
        .await
        .unwrap();
    assert_eq!(created.id, id);

    let filter = StoreFilter::new().eq("code", "C-001").eq("id", id);
    let found = customers.find_one_by_filter(&filter).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn updating_a_missing_row_is_not_found() {
    let models = setup().await;

    let mut product = Product::new("Ghost");
    product.id = -42;
    let err = models.products().update(product).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn removing_every_item_empties_the_order() {
    let models = setup().await;

    let mut order = order_with_two_items(&models).await;
    for item in order.items().to_vec() {
        order.remove_order_item(&item);
    }
    order.recalculate_total();

    let saved = models.orders().save(order).await.unwrap();
    assert!(saved.items().is_empty());
    assert_eq!(saved.total_amount, Decimal::ZERO);
    assert!(models.orders().items_for(saved.id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_many_applies_every_change() {
    let models = setup().await;
    let products = models.products();

    let lamp = create_product(&models, Decimal::new(1999, 2)).await;
    let bulb = create_product(&models, Decimal::new(250, 2)).await;

    let mut changed_lamp = lamp.clone();
    changed_lamp.name = "Floor lamp".to_string();
    let mut changed_bulb = bulb.clone();
    changed_bulb.quantity = Some(12);

    let updated = products
        .update_many(vec![changed_lamp, changed_bulb])
        .await
        .unwrap();
    assert_eq!(updated.len(), 2);
    assert_eq!(products.get_existing(&lamp.id).await.unwrap().name, "Floor lamp");
    assert_eq!(products.get_existing(&bulb.id).await.unwrap().quantity, Some(12));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn update_many_rolls_back_when_a_row_is_missing() {
    let models = setup().await;
    let products = models.products();

    let lamp = create_product(&models, Decimal::new(1999, 2)).await;
    let mut changed = lamp.clone();
    changed.name = "Renamed".to_string();
    let mut ghost = Product::new("Ghost");
    ghost.id = -7;

    let err = products.update_many(vec![changed, ghost]).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }), "unexpected error: {err}");
    assert_eq!(products.get_existing(&lamp.id).await.unwrap().name, lamp.name);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_many_reports_only_deleted_ids() {
    let models = setup().await;
    let products = models.products();

    let lamp = create_product(&models, Decimal::new(1999, 2)).await;
    let bulb = create_product(&models, Decimal::new(250, 2)).await;

    let deleted = products
        .delete_many(vec![lamp.id, -9, bulb.id])
        .await
        .unwrap();
    assert_eq!(deleted, [lamp.id, bulb.id]);
    assert!(!products.exists(&lamp.id).await.unwrap());
    assert!(!products.exists(&bulb.id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn count_tracks_inserts_and_deletes() {
    let models = setup().await;
    let rows = models.order_product_items();

    let before = rows.count().await.unwrap();
    let first = rows.create(OrderProductItem::new()).await.unwrap();
    let second = rows.create(OrderProductItem::new()).await.unwrap();
    assert_eq!(rows.count().await.unwrap(), before + 2);

    assert!(rows.delete(&first.id).await.unwrap());
    assert!(rows.delete(&second.id).await.unwrap());
    assert_eq!(rows.count().await.unwrap(), before);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn list_all_puts_newest_first() {
    let models = setup().await;
    let users = models.users();

    let older = create_user(&models).await;
    let newer = create_user(&models).await;

    let all = users.list_all().await.unwrap();
    assert!(all.windows(2).all(|pair| {
        pair[0].created_at > pair[1].created_at
            || (pair[0].created_at == pair[1].created_at && pair[0].id < pair[1].id)
    }));

    let position = |id: i64| all.iter().position(|user| user.id == id).unwrap();
    assert!(position(newer.id) < position(older.id));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn disabled_users_are_excluded_from_active_queries() {
    let models = setup().await;
    let users = models.users();

    let user = create_user(&models).await;
    assert!(users.set_active(&user.id, false).await.unwrap());

    let reloaded = users.get_existing(&user.id).await.unwrap();
    assert!(!reloaded.enabled);
    assert!(users.list_active().await.unwrap().iter().all(|u| u.id != user.id));
    assert!(users.list_all().await.unwrap().iter().any(|u| u.id == user.id));

    // Read the active count first; concurrent tests only add enabled users
    let active = users.count_active().await.unwrap();
    let total = users.count().await.unwrap();
    assert!(total > active);

    assert!(users.set_active(&user.id, true).await.unwrap());
    assert!(users.get_existing(&user.id).await.unwrap().enabled);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn transaction_writes_appear_only_after_commit() {
    let models = setup().await;
    let products = models.products();

    let mut tx = products.begin_transaction().await.unwrap();
    let discarded = Product::new("Discarded")
        .with_sku(unique("sku"))
        .execute_create_tx(tx.as_mut())
        .await
        .unwrap();
    tx.rollback().await.unwrap();
    assert!(products.get_by_id(&discarded.id).await.unwrap().is_none());

    let mut tx = products.begin_transaction().await.unwrap();
    let kept = Product::new("Kept")
        .with_sku(unique("sku"))
        .execute_create_tx(tx.as_mut())
        .await
        .unwrap();
    assert!(!products.exists(&kept.id).await.unwrap());
    tx.commit().await.unwrap();
    assert!(products.exists(&kept.id).await.unwrap());
}
