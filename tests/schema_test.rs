//! Schema generation tests
//!
//! Everything here is derived from model metadata alone, so no database is needed.

use store_models::migration::{migration_statements, table_names};
use store_models::prelude::*;

#[test]
fn order_items_table_matches_the_data_model() {
    assert_eq!(
        OrderItem::create_table_sql(),
        concat!(
            r#"CREATE TABLE IF NOT EXISTS "order_items" ("#,
            r#""id" BIGSERIAL PRIMARY KEY, "#,
            r#""position" INTEGER NOT NULL, "#,
            r#""order_id" BIGINT NOT NULL REFERENCES "orders" ("id") ON DELETE CASCADE, "#,
            r#""product_id" BIGINT NOT NULL REFERENCES "products" ("id"), "#,
            r#""quantity" INTEGER NOT NULL, "#,
            r#""price_at_purchase" NUMERIC(19,4) NOT NULL, "#,
            r#""subtotal" NUMERIC(19,4) NOT NULL)"#
        )
    );
    assert_eq!(
        OrderItem::create_indexes_sql(),
        vec![
            r#"CREATE INDEX IF NOT EXISTS "idx_order_items_order_id" ON "order_items" ("order_id")"#,
            r#"CREATE INDEX IF NOT EXISTS "idx_order_items_product_id" ON "order_items" ("product_id")"#,
        ]
    );
}

#[test]
fn only_position_and_order_link_are_updatable_on_items() {
    assert_eq!(OrderItem::update_fields(), ["position", "order_id"]);
    assert_eq!(
        OrderItem::update_sql(),
        r#"UPDATE "order_items" SET "position" = $1, "order_id" = $2 WHERE "id" = $3 RETURNING *"#
    );
    assert_eq!(
        OrderItem::create_sql(),
        r#"INSERT INTO "order_items" ("position", "order_id", "product_id", "quantity", "price_at_purchase", "subtotal") VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"#
    );
}

#[test]
fn orders_table_has_defaults_and_no_items_column() {
    let sql = Order::create_table_sql();
    assert!(sql.contains(r#""user_id" BIGINT NOT NULL REFERENCES "users" ("id")"#));
    assert!(sql.contains(r#""order_date" TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()"#));
    assert!(sql.contains(r#""status" VARCHAR NOT NULL DEFAULT 'PENDING'"#));
    assert!(sql.contains(r#""total_amount" NUMERIC(19,4) NOT NULL DEFAULT 0"#));
    assert!(sql.contains(r#""shipping_address" TEXT,"#));
    assert!(sql.contains(r#""payment_status" VARCHAR,"#));
    assert!(!sql.contains(r#""items""#));

    assert!(!Order::has_column("items"));
    assert!(!Order::update_fields().contains(&"order_date"));
    assert!(!Order::update_fields().contains(&"user_id"));
    assert!(Order::create_fields().contains(&"order_date"));
    assert!(Order::update_sql().contains(r#""updated_at" = NOW()"#));
}

#[test]
fn users_are_unique_by_username_and_email() {
    let sql = User::create_table_sql();
    assert!(sql.contains(r#""username" VARCHAR NOT NULL UNIQUE"#));
    assert!(sql.contains(r#""email" VARCHAR NOT NULL UNIQUE"#));
    assert!(sql.contains(r#""first_name" VARCHAR,"#));
    assert!(sql.contains(r#""enabled" BOOLEAN NOT NULL DEFAULT TRUE"#));
    assert_eq!(User::soft_delete_field(), Some("enabled"));
    assert!(!User::create_fields().contains(&"created_at"));
}

#[test]
fn customers_take_caller_supplied_ids() {
    assert_eq!(
        Customer::create_table_sql(),
        r#"CREATE TABLE IF NOT EXISTS "customers" ("id" BIGINT PRIMARY KEY, "name" VARCHAR, "code" VARCHAR NOT NULL)"#
    );
    assert_eq!(Customer::create_fields(), ["id", "name", "code"]);
    assert_eq!(Customer::updated_at_field(), None);
    assert!(!Customer::supports_soft_delete());
}

#[test]
fn stores_and_products_carry_their_constraints() {
    let stores = Store::create_table_sql();
    assert!(stores.contains(r#""name" VARCHAR NOT NULL UNIQUE"#));
    assert!(stores.contains(r#""description" TEXT"#));
    assert!(stores.contains(r#""is_active" BOOLEAN NOT NULL DEFAULT TRUE"#));

    let products = Product::create_table_sql();
    assert!(products.contains(r#""sku" VARCHAR UNIQUE"#));
    assert!(products.contains(r#""price" NUMERIC(19,4),"#));
    assert!(products.contains(r#""quantity" INTEGER,"#));
    assert_eq!(
        Product::create_indexes_sql(),
        vec![r#"CREATE INDEX IF NOT EXISTS "idx_products_category" ON "products" ("category")"#]
    );
}

#[test]
fn placeholder_table_inserts_default_values() {
    assert_eq!(
        OrderProductItem::create_sql(),
        r#"INSERT INTO "order_product_items" DEFAULT VALUES RETURNING *"#
    );
    assert_eq!(OrderProductItem::update_sql(), "");
    assert!(OrderProductItem::update_fields().is_empty());
}

#[test]
fn migration_runs_drop_create_trigger_then_indexes() {
    let statements = migration_statements::<Order>(true);
    assert_eq!(statements.len(), 6);
    assert_eq!(statements[0], r#"DROP TABLE IF EXISTS "orders" CASCADE"#);
    assert!(statements[1].starts_with(r#"CREATE TABLE IF NOT EXISTS "orders""#));
    assert!(statements[2].starts_with("CREATE OR REPLACE FUNCTION"));
    assert!(statements[3].contains("orders_updated_at_touch"));
    assert!(statements[4].contains(r#""idx_orders_user_id""#));
    assert!(statements[5].contains(r#""idx_orders_status""#));

    assert_eq!(migration_statements::<Customer>(false).len(), 1);
}

#[test]
fn tables_are_listed_parents_first() {
    let names = table_names();
    let position = |table: &str| names.iter().position(|n| *n == table).unwrap();

    assert!(position("users") < position("orders"));
    assert!(position("orders") < position("order_items"));
    assert!(position("products") < position("order_items"));
    assert_eq!(names.len(), 7);
}
