//! DuckDB store backend implementation

use crate::error::{StoreError, StoreResult};
use crate::traits::Store;
use crate::value::{QueryResult, Row, Value};
use async_trait::async_trait;
use duckdb::types::{ToSqlOutput, Value as DuckValue};
use duckdb::{params_from_iter, Connection, ToSql};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

impl ToSql for Value {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(DuckValue::Null),
            Value::Int(v) => ToSqlOutput::Owned(DuckValue::BigInt(*v)),
            Value::Real(v) => ToSqlOutput::Owned(DuckValue::Double(*v)),
            Value::Bool(v) => ToSqlOutput::Owned(DuckValue::Boolean(*v)),
            Value::Text(s) => ToSqlOutput::Owned(DuckValue::Text(s.clone())),
        })
    }
}

/// Read a column value, trying types from narrowest to widest.
///
/// DuckDB's driver is strict per type: an integer read on a VARCHAR column
/// errors rather than parsing, so the fallthrough cannot misclassify.
fn read_value(row: &duckdb::Row<'_>, idx: usize) -> Value {
    match row.get::<_, Option<i64>>(idx) {
        Ok(Some(v)) => return Value::Int(v),
        Ok(None) => return Value::Null,
        Err(_) => {}
    }
    if let Ok(Some(v)) = row.get::<_, Option<f64>>(idx) {
        return Value::Real(v);
    }
    if let Ok(Some(v)) = row.get::<_, Option<bool>>(idx) {
        return Value::Bool(v);
    }
    if let Ok(Some(v)) = row.get::<_, Option<String>>(idx) {
        return Value::Text(v);
    }
    Value::Null
}

fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.rfind('.') {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

/// DuckDB store backend
pub struct DuckDbStore {
    conn: Mutex<Connection>,
}

impl DuckDbStore {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> StoreResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> StoreResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::MutexPoisoned(e.to_string()))
    }

    fn execute_sync(&self, sql: &str, params: &[Value]) -> StoreResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, params_from_iter(params.iter()))
            .map_err(|e| StoreError::ExecutionError(format!("{e}: {sql}")))
    }

    fn execute_batch_sync(&self, sql: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| StoreError::ExecutionError(e.to_string()))
    }

    fn query_sync(&self, sql: &str, params: &[Value]) -> StoreResult<QueryResult> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| StoreError::QueryError(format!("{e}: {sql}")))?;

        // Collect rows before reading column metadata; the driver panics on
        // column_count() before execution.
        let raw_rows: Vec<Vec<Value>> = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count).map(|i| read_value(row, i)).collect())
            })
            .map_err(|e| StoreError::QueryError(format!("{e}: {sql}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::QueryError(format!("row error: {e}")))?;

        let column_count = stmt.column_count();
        let columns: Arc<Vec<String>> = Arc::new(
            (0..column_count)
                .map(|i| {
                    stmt.column_name(i)
                        .map_or("?".to_string(), |v| v.to_string())
                })
                .collect(),
        );

        let rows = raw_rows
            .into_iter()
            .map(|values| Row::new(columns.clone(), values))
            .collect();
        Ok(QueryResult { columns, rows })
    }

    fn relation_exists_sync(&self, name: &str) -> StoreResult<bool> {
        let conn = self.lock()?;

        let (schema, table) = split_qualified(name);
        let schema = schema.unwrap_or("main");

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM information_schema.tables
                 WHERE table_schema = ? AND table_name = ?",
                duckdb::params![schema, table],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::QueryError(e.to_string()))?;

        Ok(count > 0)
    }

    fn swap_tables_sync(&self, current: &str, replacement: &str) -> StoreResult<()> {
        let (cur_schema, cur_leaf) = split_qualified(current);
        let (repl_schema, _) = split_qualified(replacement);
        if cur_schema != repl_schema {
            return Err(StoreError::Internal(format!(
                "cannot swap across schemas: {current} vs {replacement}"
            )));
        }

        let retired_leaf = format!("{cur_leaf}_retired");
        let retired = match cur_schema {
            Some(s) => format!("{s}.{retired_leaf}"),
            None => retired_leaf.clone(),
        };

        // Both renames commit together, so readers see the old table right
        // up until the new one takes its name.
        let batch = format!(
            "DROP TABLE IF EXISTS {retired};
             BEGIN TRANSACTION;
             ALTER TABLE {current} RENAME TO {retired_leaf};
             ALTER TABLE {replacement} RENAME TO {cur_leaf};
             COMMIT;
             DROP TABLE IF EXISTS {retired};"
        );
        self.execute_batch_sync(&batch)
    }
}

#[async_trait]
impl Store for DuckDbStore {
    async fn execute(&self, sql: &str) -> StoreResult<usize> {
        self.execute_sync(sql, &[])
    }

    async fn execute_with(&self, sql: &str, params: &[Value]) -> StoreResult<usize> {
        self.execute_sync(sql, params)
    }

    async fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn query(&self, sql: &str) -> StoreResult<QueryResult> {
        self.query_sync(sql, &[])
    }

    async fn query_with(&self, sql: &str, params: &[Value]) -> StoreResult<QueryResult> {
        self.query_sync(sql, params)
    }

    async fn relation_exists(&self, name: &str) -> StoreResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn swap_tables(&self, current: &str, replacement: &str) -> StoreResult<()> {
        self.swap_tables_sync(current, replacement)
    }

    async fn commit(&self) -> StoreResult<()> {
        // Autocommit: every statement has already committed.
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
