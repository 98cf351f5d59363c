use crate::traits::TableMetadata;
use crate::DbPool;

/// Generic database store that provides default implementations for all database operations
#[derive(Clone)]
pub struct GenericStore<T: TableMetadata> {
    pub(crate) db_pool: DbPool,
    pub(crate) _phantom: std::marker::PhantomData<T>,
}

impl<T: TableMetadata> std::fmt::Debug for GenericStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericStore")
            .field("table", &T::table_name())
            .field("soft_delete", &T::supports_soft_delete())
            .finish()
    }
}

impl<T: TableMetadata> GenericStore<T> {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            db_pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &DbPool {
        &self.db_pool
    }

    /// Ordering shared by every list query: newest first when the table tracks
    /// creation time, then by primary key so ties are stable.
    pub(crate) fn order_by_clause() -> String {
        let pk = type_mapping::quote_identifier(T::primary_key_field());
        match T::created_at_field() {
            Some(created_at) => format!(
                " ORDER BY {} DESC, {}",
                type_mapping::quote_identifier(created_at),
                pk
            ),
            None => format!(" ORDER BY {}", pk),
        }
    }
}
