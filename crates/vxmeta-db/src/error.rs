//! Error types for vxmeta-db

use thiserror::Error;

/// Store operation errors
///
/// Connection and statement failures are fatal to a pipeline run: there is
/// no statement-level retry and no transient/permanent distinction.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection error (S001)
    #[error("[S001] Store connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (S002)
    #[error("[S002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Query error (S003)
    #[error("[S003] SQL query failed: {0}")]
    QueryError(String),

    /// Row column access error (S004)
    #[error("[S004] Column access failed: {0}")]
    ColumnError(String),

    /// Mutex poisoned (S005)
    #[error("[S005] Store mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Internal error (S006)
    #[error("[S006] Internal store error: {0}")]
    Internal(String),
}

/// Result type alias for StoreError
pub type StoreResult<T> = Result<T, StoreError>;
