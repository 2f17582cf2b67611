//! Store trait definition

use crate::error::StoreResult;
use crate::value::{QueryResult, Value};
use async_trait::async_trait;

/// Tabular store abstraction for vxmeta
///
/// Implementations must be Send + Sync for async operation. Each call is an
/// independently committed statement (autocommit discipline); only
/// [`swap_tables`](Store::swap_tables) is transactional internally.
#[async_trait]
pub trait Store: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> StoreResult<usize>;

    /// Execute SQL with bound parameters
    async fn execute_with(&self, sql: &str, params: &[Value]) -> StoreResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> StoreResult<()>;

    /// Execute a query, returning the fully materialized result set
    async fn query(&self, sql: &str) -> StoreResult<QueryResult>;

    /// Execute a query with bound parameters
    async fn query_with(&self, sql: &str, params: &[Value]) -> StoreResult<QueryResult>;

    /// Check if a table or view exists (schema-qualified names supported)
    async fn relation_exists(&self, name: &str) -> StoreResult<bool>;

    /// Atomically replace table `current` with table `replacement`.
    ///
    /// Both names must live in the same schema. Readers observe either the
    /// old or the new table, never an intermediate state; `replacement` no
    /// longer exists afterwards.
    async fn swap_tables(&self, current: &str, replacement: &str) -> StoreResult<()>;

    /// Commit. A no-op under autocommit, but always callable.
    async fn commit(&self) -> StoreResult<()>;

    /// Store type identifier for logging
    fn store_type(&self) -> &'static str;
}
