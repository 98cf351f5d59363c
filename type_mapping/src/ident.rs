//! SQL identifier rules
//!
//! Table and column names are checked once at macro expansion time and again
//! whenever a caller passes a column name at runtime (filters). Both sides use
//! this module so the two checks can never drift apart.

use thiserror::Error;

/// PostgreSQL truncates identifiers longer than this (NAMEDATALEN - 1)
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name '{name}' is too long: {length} characters (max {max_length})")]
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },

    #[error("Name '{0}' must start with a letter or underscore")]
    InvalidStartCharacter(String),

    #[error("Invalid characters in name '{0}': only alphanumeric characters and underscores are allowed")]
    InvalidCharacters(String),

    #[error("Name '{0}' is a reserved SQL keyword")]
    ReservedKeyword(String),
}

const RESERVED_KEYWORDS: &[&str] = &[
    // DML / DQL
    "SELECT", "INSERT", "UPDATE", "DELETE", "FROM", "WHERE", "JOIN", "INNER", "LEFT", "RIGHT",
    "FULL", "OUTER", "ON", "AS", "AND", "OR", "NOT", "NULL", "TRUE", "FALSE", "CASE", "WHEN",
    "THEN", "ELSE", "END", "IF", "EXISTS", "IN", "LIKE", "BETWEEN", "ORDER", "BY", "GROUP",
    "HAVING", "LIMIT", "OFFSET", "UNION", "ALL", "DISTINCT", "RETURNING", "DEFAULT",
    // DDL
    "CREATE", "DROP", "ALTER", "TABLE", "INDEX", "VIEW", "DATABASE", "SCHEMA", "PRIMARY", "KEY",
    "FOREIGN", "REFERENCES", "UNIQUE", "CHECK", "CONSTRAINT", "COLUMN", "CASCADE", "TRIGGER",
    "FUNCTION", "SEQUENCE", "TO",
    // Type names
    "SERIAL", "BIGSERIAL", "SMALLSERIAL", "TEXT", "VARCHAR", "CHAR", "INTEGER", "BIGINT",
    "SMALLINT", "DECIMAL", "NUMERIC", "REAL", "DOUBLE", "BOOLEAN", "DATE", "TIME", "TIMESTAMP",
    "TIMESTAMPTZ", "INTERVAL", "UUID", "JSON", "JSONB", "ARRAY",
];

/// Check a table or column name against PostgreSQL's unquoted identifier rules
/// plus a list of reserved keywords.
pub fn validate_identifier(name: &str) -> Result<(), IdentifierError> {
    let first_char = name.chars().next().ok_or(IdentifierError::Empty)?;

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(IdentifierError::TooLong {
            name: name.to_string(),
            length: name.len(),
            max_length: MAX_IDENTIFIER_LENGTH,
        });
    }

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(IdentifierError::InvalidStartCharacter(name.to_string()));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(IdentifierError::InvalidCharacters(name.to_string()));
    }

    if is_reserved_keyword(name) {
        return Err(IdentifierError::ReservedKeyword(name.to_string()));
    }

    Ok(())
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name.to_ascii_uppercase().as_str())
}
