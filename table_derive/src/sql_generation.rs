//! SQL code generation for database operations
//!
//! This module generates the static SQL strings, schema metadata and
//! `DatabaseExecutor` implementation for a parsed model.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;
use type_mapping::quote_identifier;

use crate::parsing::{ColumnInfo, FieldInfo, OnDeleteAction, TableInfo};

/// Static SQL statements for one table, all built at expansion time
struct Statements {
    create: String,
    update: String,
    get_by_id: String,
    list_all: String,
    delete_by_id: String,
    count_all: String,
    select_base: String,
}

fn build_statements(table_info: &TableInfo, field_info: &FieldInfo) -> Statements {
    let table = quote_identifier(&table_info.name);
    let pk = quote_identifier(&field_info.primary_key_field.to_string());

    let create = if field_info.create_fields.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING *", table)
    } else {
        let names: Vec<String> = field_info
            .create_fields
            .iter()
            .map(|f| quote_identifier(&f.to_string()))
            .collect();
        let placeholders: Vec<String> = (1..=names.len()).map(|i| format!("${}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
            table,
            names.join(", "),
            placeholders.join(", ")
        )
    };

    let mut assignments: Vec<String> = field_info
        .update_fields
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{} = ${}", quote_identifier(&f.to_string()), i + 1))
        .collect();
    if let Some(updated_at) = &field_info.updated_at_field {
        assignments.push(format!("{} = NOW()", quote_identifier(updated_at)));
    }
    // Nothing to assign means the row is immutable after insert
    let update = if field_info.update_fields.is_empty() {
        String::new()
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = ${} RETURNING *",
            table,
            assignments.join(", "),
            pk,
            field_info.update_fields.len() + 1
        )
    };

    let order_by = match &field_info.created_at_field {
        Some(created_at) => format!("{} DESC, {}", quote_identifier(created_at), pk),
        None => pk.clone(),
    };

    Statements {
        create,
        update,
        get_by_id: format!("SELECT * FROM {} WHERE {} = $1", table, pk),
        list_all: format!("SELECT * FROM {} ORDER BY {}", table, order_by),
        delete_by_id: format!("DELETE FROM {} WHERE {} = $1", table, pk),
        count_all: format!("SELECT COUNT(*) AS total FROM {}", table),
        select_base: format!("SELECT * FROM {}", table),
    }
}

fn column_def_tokens(column: &ColumnInfo) -> TokenStream {
    let name = &column.name;
    let sql_type = &column.sql_type;
    let nullable = column.nullable;
    let primary_key = column.primary_key;
    let unique = column.unique;

    let default = match &column.default {
        Some(expr) => quote! { Some(#expr) },
        None => quote! { None },
    };

    let references = match &column.foreign_key {
        Some(fk) => {
            let table = &fk.table;
            let fk_column = &fk.column;
            let on_delete = match fk.on_delete {
                OnDeleteAction::NoAction => quote! { NoAction },
                OnDeleteAction::Restrict => quote! { Restrict },
                OnDeleteAction::Cascade => quote! { Cascade },
                OnDeleteAction::SetNull => quote! { SetNull },
            };
            quote! {
                Some(::store_models::store_object::ForeignKey {
                    table: #table,
                    column: #fk_column,
                    on_delete: ::store_models::store_object::OnDelete::#on_delete,
                })
            }
        }
        None => quote! { None },
    };

    quote! {
        ::store_models::store_object::ColumnDef {
            name: #name,
            sql_type: #sql_type,
            nullable: #nullable,
            primary_key: #primary_key,
            unique: #unique,
            default: #default,
            references: #references,
        }
    }
}

/// Index definitions: explicit `#[index]` columns, unindexed foreign keys and
/// the composite indexes declared on the struct
fn index_def_tokens(table_info: &TableInfo, field_info: &FieldInfo) -> Vec<TokenStream> {
    let table = &table_info.name;
    let mut defs: Vec<(Vec<String>, bool)> = Vec::new();

    for column in &field_info.columns {
        let wants_index = column.indexed || (column.foreign_key.is_some() && !column.unique);
        if wants_index && !column.primary_key {
            defs.push((vec![column.name.clone()], false));
        }
    }
    for fields in &table_info.composite_indexes {
        defs.push((fields.clone(), false));
    }
    for fields in &table_info.composite_unique_indexes {
        defs.push((fields.clone(), true));
    }

    defs.into_iter()
        .map(|(columns, unique)| {
            let prefix = if unique { "uq" } else { "idx" };
            let index_name = format!("{}_{}_{}", prefix, table, columns.join("_"));
            quote! {
                ::store_models::store_object::IndexDef {
                    name: #index_name,
                    columns: &[#(#columns),*],
                    unique: #unique,
                }
            }
        })
        .collect()
}

fn optional_str(value: &Option<String>) -> TokenStream {
    match value {
        Some(v) => quote! { Some(#v) },
        None => quote! { None },
    }
}

pub fn generate_table_metadata_impl(
    name: &Ident,
    table_info: &TableInfo,
    field_info: &FieldInfo,
) -> TokenStream {
    let table_name = &table_info.name;
    let statements = build_statements(table_info, field_info);
    let Statements {
        create,
        update,
        get_by_id,
        list_all,
        delete_by_id,
        count_all,
        select_base,
    } = &statements;

    let pk_field = &field_info.primary_key_field;
    let pk_name = pk_field.to_string();
    let pk_type = &field_info.primary_key_type;

    let columns: Vec<TokenStream> = field_info.columns.iter().map(column_def_tokens).collect();
    let indexes = index_def_tokens(table_info, field_info);

    let create_fields: Vec<String> = field_info.create_fields.iter().map(|f| f.to_string()).collect();
    let update_fields: Vec<String> = field_info.update_fields.iter().map(|f| f.to_string()).collect();

    let soft_delete_field = optional_str(&field_info.soft_delete_field);
    let created_at_field = optional_str(&field_info.created_at_field);
    let updated_at_field = optional_str(&field_info.updated_at_field);

    quote! {
        impl ::store_models::store_object::TableMetadata for #name {
            type Id = #pk_type;

            fn table_name() -> &'static str {
                #table_name
            }

            fn primary_key_field() -> &'static str {
                #pk_name
            }

            fn extract_id(&self) -> Self::Id {
                ::core::clone::Clone::clone(&self.#pk_field)
            }

            fn columns() -> &'static [::store_models::store_object::ColumnDef] {
                const COLUMNS: &[::store_models::store_object::ColumnDef] = &[#(#columns),*];
                COLUMNS
            }

            fn indexes() -> &'static [::store_models::store_object::IndexDef] {
                const INDEXES: &[::store_models::store_object::IndexDef] = &[#(#indexes),*];
                INDEXES
            }

            fn create_fields() -> &'static [&'static str] {
                &[#(#create_fields),*]
            }

            fn update_fields() -> &'static [&'static str] {
                &[#(#update_fields),*]
            }

            fn soft_delete_field() -> Option<&'static str> {
                #soft_delete_field
            }

            fn created_at_field() -> Option<&'static str> {
                #created_at_field
            }

            fn updated_at_field() -> Option<&'static str> {
                #updated_at_field
            }

            fn create_sql() -> &'static str {
                #create
            }

            fn update_sql() -> &'static str {
                #update
            }

            fn get_by_id_sql() -> &'static str {
                #get_by_id
            }

            fn list_all_sql() -> &'static str {
                #list_all
            }

            fn delete_by_id_sql() -> &'static str {
                #delete_by_id
            }

            fn count_all_sql() -> &'static str {
                #count_all
            }

            fn select_base_sql() -> &'static str {
                #select_base
            }
        }
    }
}

/// Generate DatabaseExecutor trait implementation with proper async methods
pub fn generate_database_executor_impl(name: &Ident, field_info: &FieldInfo) -> TokenStream {
    let create_bind_calls: Vec<_> = field_info
        .create_fields
        .iter()
        .map(|field_ident| quote! { .bind(::core::clone::Clone::clone(&self.#field_ident)) })
        .collect();

    let update_bind_calls: Vec<_> = field_info
        .update_fields
        .iter()
        .map(|field_ident| quote! { .bind(::core::clone::Clone::clone(&self.#field_ident)) })
        .collect();

    let pk_field = &field_info.primary_key_field;

    let update_body = |executor: TokenStream| {
        if field_info.update_fields.is_empty() {
            quote! {
                Err(::store_models::store_object::StoreError::validation(
                    <Self as ::store_models::store_object::TableMetadata>::table_name(),
                    <Self as ::store_models::store_object::TableMetadata>::primary_key_field(),
                    "table has no updatable columns",
                ))
            }
        } else {
            quote! {
                let sql = <Self as ::store_models::store_object::TableMetadata>::update_sql();
                ::store_models::sqlx::query_as::<_, Self>(sql)
                    #(#update_bind_calls)*
                    .bind(::core::clone::Clone::clone(&self.#pk_field))
                    .fetch_one(#executor)
                    .await
                    .map_err(|e| ::store_models::store_object::StoreError::database_operation(
                        <Self as ::store_models::store_object::TableMetadata>::table_name(),
                        "update",
                        e,
                    ))
            }
        }
    };

    let update_pool = update_body(quote! { pool });
    let update_tx = update_body(quote! { &mut **tx });

    quote! {
        #[::store_models::async_trait::async_trait]
        impl ::store_models::store_object::DatabaseExecutor for #name {
            async fn execute_create(
                &self,
                pool: &::store_models::sqlx::PgPool,
            ) -> Result<Self, ::store_models::store_object::StoreError> {
                let sql = <Self as ::store_models::store_object::TableMetadata>::create_sql();
                ::store_models::sqlx::query_as::<_, Self>(sql)
                    #(#create_bind_calls)*
                    .fetch_one(pool)
                    .await
                    .map_err(|e| ::store_models::store_object::StoreError::database_operation(
                        <Self as ::store_models::store_object::TableMetadata>::table_name(),
                        "create",
                        e,
                    ))
            }

            async fn execute_create_tx(
                &self,
                tx: &mut ::store_models::sqlx::Transaction<'_, ::store_models::sqlx::Postgres>,
            ) -> Result<Self, ::store_models::store_object::StoreError> {
                let sql = <Self as ::store_models::store_object::TableMetadata>::create_sql();
                ::store_models::sqlx::query_as::<_, Self>(sql)
                    #(#create_bind_calls)*
                    .fetch_one(&mut **tx)
                    .await
                    .map_err(|e| ::store_models::store_object::StoreError::database_operation(
                        <Self as ::store_models::store_object::TableMetadata>::table_name(),
                        "create",
                        e,
                    ))
            }

            async fn execute_update(
                &self,
                pool: &::store_models::sqlx::PgPool,
            ) -> Result<Self, ::store_models::store_object::StoreError> {
                #update_pool
            }

            async fn execute_update_tx(
                &self,
                tx: &mut ::store_models::sqlx::Transaction<'_, ::store_models::sqlx::Postgres>,
            ) -> Result<Self, ::store_models::store_object::StoreError> {
                #update_tx
            }
        }
    }
}
