use super::core::StoreObject;
use crate::validation::{ValidatedFieldName, ValidationError};
use crate::StoreError;
use async_trait::async_trait;
use type_mapping::{quote_identifier, PostgresValue};

/// Equality filter for database queries
///
/// Conditions are combined with AND. A `Null` value compares with `IS NULL`.
#[derive(Clone, Debug, Default)]
pub struct StoreFilter {
    pub conditions: Vec<(String, PostgresValue)>, // (field_name, value)
}

impl StoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<PostgresValue>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|(field, _)| field.as_str())
    }

    /// Build ` WHERE ...` with `$n` placeholders plus the values to bind, in order
    pub fn build_where_clause(&self) -> Result<(String, Vec<PostgresValue>), ValidationError> {
        if self.conditions.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut where_clause = " WHERE ".to_string();
        let mut values = Vec::new();

        for (i, (field, value)) in self.conditions.iter().enumerate() {
            let field = ValidatedFieldName::new(field)?;
            if i > 0 {
                where_clause.push_str(" AND ");
            }
            where_clause.push_str(&quote_identifier(field.as_str()));
            if value.is_null() {
                where_clause.push_str(" IS NULL");
            } else {
                values.push(value.clone());
                where_clause.push_str(&format!(" = ${}", values.len()));
            }
        }

        Ok((where_clause, values))
    }
}

/// Trait for objects that support filtering
#[async_trait]
pub trait Filterable: StoreObject {
    /// List objects filtered by some criteria
    async fn list_by_filter(&self, filter: &StoreFilter) -> Result<Vec<Self::Model>, StoreError>;

    /// First match in list order, if any
    async fn find_one_by_filter(
        &self,
        filter: &StoreFilter,
    ) -> Result<Option<Self::Model>, StoreError> {
        Ok(self.list_by_filter(filter).await?.into_iter().next())
    }

    async fn count_by_filter(&self, filter: &StoreFilter) -> Result<i64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, values) = StoreFilter::new().build_where_clause().unwrap();
        assert!(clause.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn numbers_placeholders_around_null_checks() {
        let filter = StoreFilter::new()
            .eq("user_id", 7_i64)
            .eq("payment_status", Option::<String>::None)
            .eq("status", "PENDING");

        let (clause, values) = filter.build_where_clause().unwrap();
        assert_eq!(
            clause,
            r#" WHERE "user_id" = $1 AND "payment_status" IS NULL AND "status" = $2"#
        );
        assert_eq!(
            values,
            vec![PostgresValue::BigInt(7), PostgresValue::Text("PENDING".into())]
        );
    }

    #[test]
    fn rejects_unsafe_field_names() {
        let filter = StoreFilter::new().eq("sku; DROP TABLE products", "x");
        assert!(filter.build_where_clause().is_err());
    }
}
