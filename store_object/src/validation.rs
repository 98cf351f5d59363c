//! Validated SQL identifiers
//!
//! Column names coming from callers at runtime are wrapped in
//! [`ValidatedFieldName`] before they are spliced into a statement. The rules
//! themselves live in `type_mapping::ident` and are shared with the derive macro.

use std::fmt;

pub use type_mapping::IdentifierError as ValidationError;

/// A validated field name that is safe to use in SQL queries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        type_mapping::validate_identifier(name)?;
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
