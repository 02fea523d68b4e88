//! Key-value store ports

use crate::domain::result::Result;
use crate::domain::CategoryTable;

/// String key-value store for tokens, accounts and user links
pub trait KeyValueStore: Send + Sync {
    /// Get a value; `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value, replacing any existing one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;
}

/// Store for per-user category tables
pub trait MappingRepository: Send + Sync {
    /// Get a table; `None` when no mapping was uploaded
    fn get_mapping(&self, key: &str) -> Result<Option<CategoryTable>>;

    fn set_mapping(&self, key: &str, table: &CategoryTable) -> Result<()>;
}
