//! Core StoreModels functionality
//!
//! `StoreModels` owns the connection pool and hands out one store per entity.

use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use std::time::Duration;
use store_object::GenericStore;

use crate::errors::StoreModelsError;
use crate::models::{Customer, OrderProductItem, Product, Store, User};
use crate::orders::OrderStore;
use config::{AppConfig, DatabaseConfig};

/// Connection settings passed field by field, so credentials need no URL escaping
fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.database)
}

/// Main coordinator that manages the database connection and the entity stores
#[derive(Clone)]
pub struct StoreModels {
    pool: PgPool,
}

impl std::fmt::Debug for StoreModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreModels")
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

impl StoreModels {
    /// Create new StoreModels with database connection
    pub async fn new(config: &DatabaseConfig) -> Result<Self, StoreModelsError> {
        let mut pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }

        let pool = pool_options.connect_with(connect_options(config)).await?;
        tracing::info!(
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "connected to database"
        );

        Ok(Self { pool })
    }

    /// Connect and, when `[migration] auto_migrate` is set, create the schema
    pub async fn from_app_config(config: &AppConfig) -> Result<Self, StoreModelsError> {
        let models = Self::new(&config.database).await?;
        if config.migration.auto_migrate {
            models.migrate_all(config.migration.recreate).await?;
        }
        Ok(models)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), StoreModelsError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    pub fn users(&self) -> GenericStore<User> {
        GenericStore::new(self.pool.clone())
    }

    pub fn customers(&self) -> GenericStore<Customer> {
        GenericStore::new(self.pool.clone())
    }

    pub fn stores(&self) -> GenericStore<Store> {
        GenericStore::new(self.pool.clone())
    }

    pub fn products(&self) -> GenericStore<Product> {
        GenericStore::new(self.pool.clone())
    }

    /// Orders together with their items
    pub fn orders(&self) -> OrderStore {
        OrderStore::new(self.pool.clone())
    }

    pub fn order_product_items(&self) -> GenericStore<OrderProductItem> {
        GenericStore::new(self.pool.clone())
    }
}
