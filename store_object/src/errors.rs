use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error on {table} during {operation}: {source}")]
    Database {
        table: String,
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Unique constraint violated on {table} ({constraint})")]
    UniqueViolation { table: String, constraint: String },

    #[error("Foreign key constraint violated on {table} ({constraint})")]
    ForeignKeyViolation { table: String, constraint: String },

    #[error("Required column missing on {table} ({constraint})")]
    NotNullViolation { table: String, constraint: String },

    #[error("Check constraint violated on {table} ({constraint})")]
    CheckViolation { table: String, constraint: String },

    #[error("Not found: {table} with id {id}")]
    NotFound { table: String, id: String },

    #[error("Validation error on {table}.{field}: {message}")]
    Validation {
        table: String,
        field: String,
        message: String,
    },
}

impl StoreError {
    /// Wrap a sqlx error, lifting constraint violations into their own variants
    /// so callers can react to a duplicate SKU without string matching.
    pub fn database_operation(table: &str, operation: &str, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &source {
            let constraint = db_err.constraint().unwrap_or("unnamed").to_string();
            let table = table.to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return StoreError::UniqueViolation { table, constraint }
                }
                ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKeyViolation { table, constraint }
                }
                ErrorKind::NotNullViolation => {
                    return StoreError::NotNullViolation { table, constraint }
                }
                ErrorKind::CheckViolation => {
                    return StoreError::CheckViolation { table, constraint }
                }
                _ => {}
            }
        }

        tracing::debug!(table, operation, error = %source, "database operation failed");
        StoreError::Database {
            table: table.to_string(),
            operation: operation.to_string(),
            source,
        }
    }

    pub fn validation(table: &str, field: &str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            table: table.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(table: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation { .. })
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, StoreError::ForeignKeyViolation { .. })
    }
}
