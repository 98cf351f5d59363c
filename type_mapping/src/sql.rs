//! SQL type conversion utilities
//!
//! Type names arrive as token strings from the derive macro, so both the
//! fully-qualified and the short (`use`-imported) spellings are accepted.

/// Map Rust type names to PostgreSQL types for DDL generation
///
/// `Option<T>` maps to the same type as `T`; nullability is decided separately
/// by [`is_optional_type`]. Unknown types (for example string-backed enums)
/// fall back to `VARCHAR`.
pub fn rust_type_to_pg_type(rust_type: &str) -> &'static str {
    let normalized: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = strip_option(&normalized).unwrap_or(normalized.as_str());

    match inner {
        "String" | "&str" => "VARCHAR",
        "i8" | "i16" => "SMALLINT",
        "i32" | "u16" => "INTEGER",
        "i64" | "u32" => "BIGINT",
        "u64" => "NUMERIC(20,0)",
        "f32" => "REAL",
        "f64" => "DOUBLE PRECISION",
        "bool" => "BOOLEAN",
        "chrono::DateTime<chrono::Utc>" | "DateTime<Utc>" | "DateTime<chrono::Utc>" => {
            "TIMESTAMP WITH TIME ZONE"
        }
        "chrono::NaiveDateTime" | "NaiveDateTime" => "TIMESTAMP",
        "chrono::NaiveDate" | "NaiveDate" => "DATE",
        "rust_decimal::Decimal" | "Decimal" => "NUMERIC(19,4)",
        "serde_json::Value" | "Value" => "JSONB",
        "Vec<String>" => "TEXT[]",
        "Vec<i64>" => "BIGINT[]",
        _ => "VARCHAR",
    }
}

/// Column type used for an auto-increment primary key of the given Rust type
pub fn auto_increment_pg_type(rust_type: &str) -> &'static str {
    match rust_type.trim() {
        "i16" => "SMALLSERIAL",
        "i32" => "SERIAL",
        _ => "BIGSERIAL",
    }
}

/// Check if a Rust type is Optional (nullable in SQL)
pub fn is_optional_type(rust_type: &str) -> bool {
    let normalized: String = rust_type.chars().filter(|c| !c.is_whitespace()).collect();
    strip_option(&normalized).is_some()
}

/// Double-quote an identifier for use in generated SQL
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn strip_option(normalized: &str) -> Option<&str> {
    normalized
        .strip_prefix("Option<")
        .or_else(|| normalized.strip_prefix("std::option::Option<"))
        .and_then(|rest| rest.strip_suffix('>'))
}
