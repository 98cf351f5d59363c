//! Procedural macros for generating database table metadata and operations
//!
//! This crate provides the `#[model]` macro and `TableMetadata` derive used by the
//! store-models entities. Generated code refers to `::store_models`, so models must
//! live in a crate that depends on (or is) `store-models`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod model_macro;
mod parsing;
mod sql_generation;

use model_macro::model_attribute;
use parsing::{parse_field_attributes, parse_table_attributes};
use sql_generation::{generate_database_executor_impl, generate_table_metadata_impl};

/// Derive macro for TableMetadata trait
///
/// Prefer the `#[model]` attribute macro, which adds this derive together with
/// the serde and sqlx derives every model needs.
///
/// Struct attributes:
/// - `#[table(name = "orders", auto_increment)]` (name required)
/// - `#[index(a, b)]`, `#[unique(a, b)]` for composite indexes
///
/// Field attributes:
/// - `#[primary_key]`
/// - `#[field(create, update)]`, `#[field(create)]`, `#[field(readonly)]`
/// - `#[unique]`, `#[index]`
/// - `#[soft_delete]` on the bool active flag
/// - `#[created_at]`, `#[updated_at]` for database-maintained timestamps
/// - `#[column(text)]`, `#[column(not_null)]`, `#[column(sql_type = "...")]`,
///   `#[column(default = "...")]` (raw SQL expression)
/// - `#[foreign_key(references = "orders", column = "id", on_delete = "cascade")]`
/// - `#[has_many]` for relation collections that are not columns
///
/// ```rust,ignore
/// use store_models::prelude::*;
///
/// #[model]
/// #[table(name = "customers")]
/// pub struct Customer {
///     #[primary_key]
///     #[field(create)]
///     pub id: i64,
///
///     #[field(create, update)]
///     pub code: String,
/// }
/// ```
#[proc_macro_derive(
    TableMetadata,
    attributes(
        table,
        primary_key,
        field,
        soft_delete,
        index,
        unique,
        column,
        foreign_key,
        has_many,
        created_at,
        updated_at
    )
)]
pub fn derive_table_metadata(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let table_info = match parse_table_attributes(&input.attrs) {
        Ok(attrs) => attrs,
        Err(e) => return e.to_compile_error().into(),
    };

    let field_info = match parse_field_attributes(&input.data, &table_info) {
        Ok(info) => info,
        Err(e) => return e.to_compile_error().into(),
    };

    let table_metadata_impl = generate_table_metadata_impl(name, &table_info, &field_info);
    let database_executor_impl = generate_database_executor_impl(name, &field_info);

    let expanded = quote::quote! {
        #table_metadata_impl
        #database_executor_impl
    };

    TokenStream::from(expanded)
}

/// Convenience attribute macro that adds all necessary derives for a database model
///
/// ```rust,ignore
/// use store_models::prelude::*;
///
/// #[model]
/// #[table(name = "stores", auto_increment)]
/// pub struct Store {
///     #[primary_key]
///     pub id: i64,
///     #[field(create, update)]
///     #[unique]
///     pub name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn model(attr: TokenStream, item: TokenStream) -> TokenStream {
    model_attribute(attr, item)
}
