//! Unified type mapping between Rust types and PostgreSQL
//! This crate provides consistent mapping logic used across the store-models workspace,
//! both at macro expansion time (`table-derive`) and at runtime (`store-object`).

pub mod ident;
pub mod sql;
pub mod types;

pub use ident::{validate_identifier, IdentifierError, MAX_IDENTIFIER_LENGTH};
pub use sql::{auto_increment_pg_type, is_optional_type, quote_identifier, rust_type_to_pg_type};
pub use types::PostgresValue;
