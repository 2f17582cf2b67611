//! vxmeta-db - Tabular store abstraction for vxmeta
//!
//! This crate provides the `Store` trait consumed by the pipeline and its
//! DuckDB implementation. Statements run under autocommit discipline; the
//! only multi-statement transaction is the atomic table swap.

pub mod duckdb;
pub mod error;
pub mod traits;
pub mod value;

pub use duckdb::DuckDbStore;
pub use error::{StoreError, StoreResult};
pub use traits::Store;
pub use value::{QueryResult, Row, Value};
