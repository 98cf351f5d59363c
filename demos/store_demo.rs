//! End-to-end walk through the store models
//!
//! Reads `store_models.toml` (or the file named by `STORE_MODELS_CONFIG`),
//! creates the schema and places an order.
//!
//! ```text
//! RUST_LOG=debug cargo run --example store_demo
//! ```

use anyhow::Context;
use rust_decimal::Decimal;
use store_models::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,store_models=debug")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let models = StoreModels::new(&config.database).await?;
    models.health_check().await?;
    models.migrate_all(config.migration.recreate).await?;

    let stamp = chrono::Utc::now().timestamp();

    let user = models
        .users()
        .create(
            User::new(format!("ada{}", stamp), "$argon2id$demo", format!("ada{}@example.com", stamp))
                .with_name("Ada", "Lovelace"),
        )
        .await?;
    tracing::info!(id = user.id, username = %user.username, "user created");

    let store = models
        .stores()
        .create(
            Store::new(format!("Lamp Emporium {}", stamp))
                .with_address("1 Main St")
                .with_website_url("https://lamps.example.com"),
        )
        .await?;
    tracing::info!(id = store.id, name = %store.name, "store created");

    let lamp = models
        .products()
        .create(
            Product::new("Desk lamp")
                .with_price(Decimal::new(1999, 2))
                .with_sku(format!("LAMP-{}", stamp))
                .with_quantity(25)
                .with_category("lighting"),
        )
        .await?;

    match models
        .products()
        .create(Product::new("Desk lamp copy").with_sku(format!("LAMP-{}", stamp)))
        .await
    {
        Err(e) if e.is_unique_violation() => tracing::info!("duplicate SKU rejected: {}", e),
        Err(e) => return Err(e.into()),
        Ok(_) => anyhow::bail!("duplicate SKU was accepted"),
    }

    let mut order = Order::new(user.id)
        .with_shipping_address("1 Main St")
        .with_payment("card", "PENDING");
    let price = lamp.price.unwrap_or_default();
    order.add_order_item(OrderItem::new(order.next_position(), lamp.id, 2, price));
    order.add_order_item(OrderItem::new(order.next_position(), lamp.id, 1, price));
    order.recalculate_total();

    let mut order = models.orders().create(order).await?;
    tracing::info!(
        id = order.id,
        items = order.items().len(),
        total = %order.total_amount,
        "order placed"
    );

    let second = order.items()[1].clone();
    order.remove_order_item(&second);
    order.recalculate_total();
    order.status = OrderStatus::Processing;
    let order = models.orders().save(order).await?;
    tracing::info!(
        id = order.id,
        status = %order.status,
        items = order.items().len(),
        total = %order.total_amount,
        "order updated"
    );

    let placed = models.orders().list_for_user(user.id).await?;
    tracing::info!(user = user.id, orders = placed.len(), "orders for user");

    models.orders().delete(order.id).await?;
    tracing::info!(
        remaining_items = models.orders().items_for(order.id).await?.len(),
        "order deleted"
    );

    Ok(())
}
