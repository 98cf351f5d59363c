//! Store Object - Core database abstraction layer for store-models
//!
//! This crate provides the runtime half of the `#[model]` derive: the traits the
//! derive implements, the generic store that runs CRUD against PostgreSQL, the
//! schema description used to generate DDL, and the error type shared by all of it.

#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

pub mod errors;
pub mod generic_store;
pub mod prelude;
pub mod schema;
pub mod traits;
pub mod validation;

pub use errors::StoreError;
pub use generic_store::{GenericStore, GenericStoreTransaction};
pub use schema::{ColumnDef, ForeignKey, IndexDef, OnDelete};
pub use traits::*;
pub use type_mapping::PostgresValue;
pub use validation::{ValidatedFieldName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
