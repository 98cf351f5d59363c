//! Parsing utilities for table and field attributes
//!
//! This module turns the `#[table]`, `#[field]`, `#[column]`, `#[foreign_key]`
//! and marker attributes of a model struct into [`TableInfo`] and [`FieldInfo`],
//! validating table and column names on the way.

use quote::ToTokens;
use syn::{
    punctuated::Punctuated, spanned::Spanned, Attribute, Data, Error, Fields, Ident, LitStr,
    Result, Token, Type,
};
use type_mapping::{
    auto_increment_pg_type, is_optional_type, rust_type_to_pg_type, validate_identifier,
};

/// Validate table name and return syn::Error for better proc macro error handling
pub fn validate_table_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid table name '{}': {}", name, e)))
}

/// Validate column name and return syn::Error for better proc macro error handling
pub fn validate_field_name_syn(name: &str, span: proc_macro2::Span) -> Result<()> {
    validate_identifier(name)
        .map_err(|e| Error::new(span, format!("Invalid field name '{}': {}", name, e)))
}

#[derive(Debug)]
pub struct TableInfo {
    pub name: String,
    pub has_auto_increment: bool,
    pub composite_indexes: Vec<Vec<String>>,        // #[index(field1, field2)]
    pub composite_unique_indexes: Vec<Vec<String>>, // #[unique(field1, field2)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDeleteAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
}

impl OnDeleteAction {
    fn parse(lit: &LitStr) -> Result<Self> {
        match lit.value().as_str() {
            "no_action" => Ok(Self::NoAction),
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            "set_null" => Ok(Self::SetNull),
            other => Err(Error::new(
                lit.span(),
                format!(
                    "unknown on_delete action '{}': expected one of no_action, restrict, cascade, set_null",
                    other
                ),
            )),
        }
    }
}

#[derive(Debug)]
pub struct ForeignKeyInfo {
    pub table: String,
    pub column: String,
    pub on_delete: OnDeleteAction,
}

#[derive(Debug)]
pub struct ColumnInfo {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub unique: bool,
    pub indexed: bool,
    pub default: Option<String>,
    pub foreign_key: Option<ForeignKeyInfo>,
}

#[derive(Debug)]
pub struct FieldInfo {
    pub primary_key_field: Ident,
    pub primary_key_type: Type,
    pub columns: Vec<ColumnInfo>,
    pub create_fields: Vec<Ident>,
    pub update_fields: Vec<Ident>,
    pub soft_delete_field: Option<String>,
    pub created_at_field: Option<String>,
    pub updated_at_field: Option<String>,
}

impl FieldInfo {
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Which statements a field takes part in, from `#[field(...)]`
#[derive(Debug, Default, Clone, Copy)]
struct FieldOperations {
    create: bool,
    update: bool,
    readonly: bool,
}

/// Storage overrides from `#[column(...)]`
#[derive(Debug, Default)]
struct ColumnOverrides {
    text: bool,
    not_null: bool,
    sql_type: Option<String>,
    default: Option<String>,
}

pub fn parse_table_attributes(attrs: &[Attribute]) -> Result<TableInfo> {
    let mut table_name: Option<LitStr> = None;
    let mut has_auto_increment = false;
    let mut composite_indexes = Vec::new();
    let mut composite_unique_indexes = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("table") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    table_name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("auto_increment") {
                    has_auto_increment = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported table option: expected `name` or `auto_increment`"))
                }
            })?;
        } else if attr.path().is_ident("index") {
            composite_indexes.push(parse_field_list(attr)?);
        } else if attr.path().is_ident("unique") {
            composite_unique_indexes.push(parse_field_list(attr)?);
        }
    }

    let table_name = table_name.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "table attribute is required: add #[table(name = \"table_name\")] to your struct",
        )
    })?;

    validate_table_name_syn(&table_name.value(), table_name.span())?;

    Ok(TableInfo {
        name: table_name.value(),
        has_auto_increment,
        composite_indexes,
        composite_unique_indexes,
    })
}

/// Parse a list of field names from `#[index(field1, field2)]`
fn parse_field_list(attr: &Attribute) -> Result<Vec<String>> {
    let idents = attr
        .parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)
        .map_err(|e| {
            Error::new(
                e.span(),
                "index or unique attribute on a struct expects a list of field names",
            )
        })?;

    if idents.is_empty() {
        return Err(Error::new_spanned(
            attr,
            "index or unique attribute requires at least one field name",
        ));
    }

    Ok(idents.iter().map(|i| i.to_string()).collect())
}

pub fn parse_field_attributes(data: &Data, table_info: &TableInfo) -> Result<FieldInfo> {
    let Data::Struct(data_struct) = data else {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "TableMetadata can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(fields_named) = &data_struct.fields else {
        return Err(Error::new(
            data_struct.fields.span(),
            "TableMetadata can only be derived for structs with named fields",
        ));
    };

    let mut primary_key: Option<(Ident, Type)> = None;
    let mut columns = Vec::new();
    let mut create_fields = Vec::new();
    let mut update_fields = Vec::new();
    let mut soft_delete_field = None;
    let mut created_at_field = None;
    let mut updated_at_field = None;

    for field in &fields_named.named {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "Field must have a name"))?;

        // Relation collections live on the struct only, never in the table
        if has_attribute(&field.attrs, "has_many") {
            continue;
        }

        let field_name_str = field_name.to_string();
        validate_field_name_syn(&field_name_str, field_name.span())?;

        let ty = &field.ty;
        let rust_type = ty.to_token_stream().to_string().replace(' ', "");

        let is_primary_key = has_attribute(&field.attrs, "primary_key");
        let is_created_at = has_attribute(&field.attrs, "created_at");
        let is_updated_at = has_attribute(&field.attrs, "updated_at");
        let is_soft_delete = has_attribute(&field.attrs, "soft_delete");
        let operations = parse_field_operations(&field.attrs)?;
        let overrides = parse_column_overrides(&field.attrs)?;
        let foreign_key = parse_foreign_key(&field.attrs)?;

        if is_primary_key {
            if primary_key.is_some() {
                return Err(Error::new(
                    field_name.span(),
                    "only one field can be marked #[primary_key]",
                ));
            }
            primary_key = Some((field_name.clone(), ty.clone()));
        }

        if is_soft_delete {
            if rust_type != "bool" {
                return Err(Error::new_spanned(ty, "#[soft_delete] field must be a bool"));
            }
            set_once(&mut soft_delete_field, &field_name_str, field_name, "soft_delete")?;
        }
        if is_created_at {
            set_once(&mut created_at_field, &field_name_str, field_name, "created_at")?;
        }
        if is_updated_at {
            set_once(&mut updated_at_field, &field_name_str, field_name, "updated_at")?;
        }

        let is_timestamp = is_created_at || is_updated_at;
        let is_generated_key = is_primary_key && table_info.has_auto_increment;

        if let Some(ops) = operations {
            if ops.create && is_generated_key {
                return Err(Error::new(
                    field_name.span(),
                    "auto_increment primary key is generated by the database and cannot be a create field",
                ));
            }
            if ops.create && !ops.readonly && !is_timestamp {
                create_fields.push(field_name.clone());
            }
            if ops.update && !ops.readonly && !is_timestamp && !is_primary_key {
                update_fields.push(field_name.clone());
            }
        }

        let sql_type = if is_generated_key {
            auto_increment_pg_type(&rust_type).to_string()
        } else if let Some(sql_type) = overrides.sql_type {
            sql_type
        } else if overrides.text {
            "TEXT".to_string()
        } else {
            rust_type_to_pg_type(&rust_type).to_string()
        };

        let default = if let Some(expr) = overrides.default {
            Some(expr)
        } else if is_timestamp {
            Some("NOW()".to_string())
        } else if is_soft_delete {
            Some("TRUE".to_string())
        } else {
            None
        };

        columns.push(ColumnInfo {
            name: field_name_str,
            sql_type,
            nullable: is_optional_type(&rust_type) && !overrides.not_null && !is_primary_key,
            primary_key: is_primary_key,
            unique: has_attribute(&field.attrs, "unique"),
            indexed: has_attribute(&field.attrs, "index"),
            default,
            foreign_key,
        });
    }

    let (primary_key_field, primary_key_type) = primary_key.ok_or_else(|| {
        Error::new(
            proc_macro2::Span::call_site(),
            "a #[primary_key] field is required",
        )
    })?;

    let field_info = FieldInfo {
        primary_key_field,
        primary_key_type,
        columns,
        create_fields,
        update_fields,
        soft_delete_field,
        created_at_field,
        updated_at_field,
    };

    for index_fields in table_info
        .composite_indexes
        .iter()
        .chain(&table_info.composite_unique_indexes)
    {
        for name in index_fields {
            if !field_info.column_names().any(|c| c == name) {
                return Err(Error::new(
                    proc_macro2::Span::call_site(),
                    format!("index refers to unknown column '{}'", name),
                ));
            }
        }
    }

    Ok(field_info)
}

fn set_once(slot: &mut Option<String>, value: &str, ident: &Ident, marker: &str) -> Result<()> {
    if slot.is_some() {
        return Err(Error::new(
            ident.span(),
            format!("only one field can be marked #[{}]", marker),
        ));
    }
    *slot = Some(value.to_string());
    Ok(())
}

pub fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// `#[field]` alone means create + update; `None` when the attribute is absent
fn parse_field_operations(attrs: &[Attribute]) -> Result<Option<FieldOperations>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("field")) else {
        return Ok(None);
    };

    if let syn::Meta::Path(_) = attr.meta {
        return Ok(Some(FieldOperations {
            create: true,
            update: true,
            readonly: false,
        }));
    }

    let mut ops = FieldOperations::default();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("create") {
            ops.create = true;
        } else if meta.path.is_ident("update") {
            ops.update = true;
        } else if meta.path.is_ident("readonly") {
            ops.readonly = true;
        } else {
            return Err(meta.error("unknown field operation: expected create, update or readonly"));
        }
        Ok(())
    })?;

    Ok(Some(ops))
}

fn parse_column_overrides(attrs: &[Attribute]) -> Result<ColumnOverrides> {
    let mut overrides = ColumnOverrides::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("column")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("text") {
                overrides.text = true;
                Ok(())
            } else if meta.path.is_ident("not_null") {
                overrides.not_null = true;
                Ok(())
            } else if meta.path.is_ident("sql_type") {
                let lit: LitStr = meta.value()?.parse()?;
                overrides.sql_type = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("default") {
                let lit: LitStr = meta.value()?.parse()?;
                overrides.default = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unknown column option: expected text, not_null, sql_type or default"))
            }
        })?;
    }

    Ok(overrides)
}

fn parse_foreign_key(attrs: &[Attribute]) -> Result<Option<ForeignKeyInfo>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident("foreign_key")) else {
        return Ok(None);
    };

    let mut table: Option<LitStr> = None;
    let mut column = "id".to_string();
    let mut on_delete = OnDeleteAction::NoAction;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("references") {
            table = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("column") {
            let lit: LitStr = meta.value()?.parse()?;
            validate_field_name_syn(&lit.value(), lit.span())?;
            column = lit.value();
        } else if meta.path.is_ident("on_delete") {
            let lit: LitStr = meta.value()?.parse()?;
            on_delete = OnDeleteAction::parse(&lit)?;
        } else {
            return Err(meta.error("unknown foreign_key option: expected references, column or on_delete"));
        }
        Ok(())
    })?;

    let table = table.ok_or_else(|| {
        Error::new_spanned(attr, "foreign_key requires references = \"table_name\"")
    })?;
    validate_table_name_syn(&table.value(), table.span())?;

    Ok(Some(ForeignKeyInfo {
        table: table.value(),
        column,
        on_delete,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, DeriveInput};

    fn parse(input: DeriveInput) -> Result<(TableInfo, FieldInfo)> {
        let table = parse_table_attributes(&input.attrs)?;
        let fields = parse_field_attributes(&input.data, &table)?;
        Ok((table, fields))
    }

    fn column<'a>(fields: &'a FieldInfo, name: &str) -> &'a ColumnInfo {
        fields
            .columns
            .iter()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("missing column {name}"))
    }

    #[test]
    fn test_valid_table_names() {
        for name in ["users", "user_profiles", "_private", "table123", "a"] {
            assert!(validate_table_name_syn(name, proc_macro2::Span::call_site()).is_ok());
        }
    }

    #[test]
    fn test_invalid_table_names() {
        for name in ["SELECT", "123table", "user-table", "", "users; DROP TABLE users; --"] {
            let err = validate_table_name_syn(name, proc_macro2::Span::call_site()).unwrap_err();
            assert!(err.to_string().starts_with("Invalid table name"), "{name}");
        }
    }

    #[test]
    fn parses_columns_and_operations() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "products", auto_increment)]
            #[index(category, name)]
            struct Product {
                #[primary_key]
                id: i64,
                #[field(create, update)]
                name: String,
                #[field(create, update)]
                #[column(text)]
                description: Option<String>,
                #[field(create, update)]
                #[unique]
                sku: Option<String>,
                #[field(create, update)]
                #[index]
                category: Option<String>,
                #[field(readonly)]
                #[created_at]
                created_at: DateTime<Utc>,
            }
        };

        let (table, fields) = parse(input).unwrap();
        assert_eq!(table.name, "products");
        assert!(table.has_auto_increment);
        assert_eq!(table.composite_indexes, vec![vec!["category".to_string(), "name".to_string()]]);

        assert_eq!(fields.primary_key_field, "id");
        let create: Vec<String> = fields.create_fields.iter().map(|i| i.to_string()).collect();
        assert_eq!(create, ["name", "description", "sku", "category"]);
        assert_eq!(fields.update_fields.len(), 4);
        assert_eq!(fields.created_at_field.as_deref(), Some("created_at"));

        let id = column(&fields, "id");
        assert_eq!(id.sql_type, "BIGSERIAL");
        assert!(id.primary_key && !id.nullable);

        let description = column(&fields, "description");
        assert_eq!(description.sql_type, "TEXT");
        assert!(description.nullable);

        assert!(column(&fields, "sku").unique);
        assert!(column(&fields, "category").indexed);
        assert_eq!(column(&fields, "created_at").default.as_deref(), Some("NOW()"));
    }

    #[test]
    fn parses_foreign_keys_and_skips_relations() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "order_items", auto_increment)]
            struct OrderItem {
                #[primary_key]
                id: i64,
                #[field(create, update)]
                #[column(not_null)]
                #[foreign_key(references = "orders", on_delete = "cascade")]
                order_id: Option<i64>,
                #[has_many]
                children: Vec<String>,
            }
        };

        let (_, fields) = parse(input).unwrap();
        assert_eq!(fields.columns.len(), 2);

        let order_id = column(&fields, "order_id");
        assert!(!order_id.nullable);
        let fk = order_id.foreign_key.as_ref().unwrap();
        assert_eq!(fk.table, "orders");
        assert_eq!(fk.column, "id");
        assert_eq!(fk.on_delete, OnDeleteAction::Cascade);
    }

    #[test]
    fn rejects_generated_key_in_create_fields() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "stores", auto_increment)]
            struct Store {
                #[primary_key]
                #[field(create)]
                id: i64,
            }
        };
        assert!(parse(input).is_err());
    }

    #[test]
    fn rejects_missing_primary_key() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "customers")]
            struct Customer {
                #[field(create)]
                code: String,
            }
        };
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("primary_key"));
    }

    #[test]
    fn rejects_reserved_column_names() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "order_items")]
            struct OrderItem {
                #[primary_key]
                id: i64,
                #[field(create)]
                index: i32,
            }
        };
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("reserved SQL keyword"));
    }

    #[test]
    fn rejects_unknown_on_delete_action() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "orders")]
            struct Order {
                #[primary_key]
                id: i64,
                #[foreign_key(references = "users", on_delete = "explode")]
                user_id: i64,
            }
        };
        assert!(parse(input).is_err());
    }

    #[test]
    fn rejects_unknown_index_column() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "stores")]
            #[unique(name, missing)]
            struct Store {
                #[primary_key]
                id: i64,
                name: String,
            }
        };
        let err = parse(input).unwrap_err();
        assert!(err.to_string().contains("unknown column 'missing'"));
    }

    #[test]
    fn column_default_overrides_marker_defaults() {
        let input: DeriveInput = parse_quote! {
            #[table(name = "orders", auto_increment)]
            struct Order {
                #[primary_key]
                id: i64,
                #[field(create, update)]
                #[column(default = "'PENDING'")]
                status: OrderStatus,
                #[field(create, update)]
                #[column(default = "0")]
                total_amount: Decimal,
            }
        };

        let (_, fields) = parse(input).unwrap();
        assert_eq!(column(&fields, "status").default.as_deref(), Some("'PENDING'"));
        assert_eq!(column(&fields, "status").sql_type, "VARCHAR");
        assert_eq!(column(&fields, "total_amount").default.as_deref(), Some("0"));
    }
}
