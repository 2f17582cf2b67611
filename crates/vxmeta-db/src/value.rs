//! Row and value types returned by store queries.
//!
//! Rows share one column-name header per result set and hold a small typed
//! value enum, so callers read BIGINT columns without re-parsing strings.

use crate::error::{StoreError, StoreResult};
use std::sync::Arc;

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Real(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// One result row; the column header is shared across the result set.
#[derive(Debug, Clone)]
pub struct Row {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Arc<Vec<String>>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Look up a value by column name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self
            .columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))?;
        self.values.get(idx)
    }

    /// Value of the first column, for single-column result sets.
    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    /// Required integer column.
    pub fn try_i64(&self, name: &str) -> StoreResult<i64> {
        self.opt_i64(name)?
            .ok_or_else(|| StoreError::ColumnError(format!("column '{name}' is NULL")))
    }

    /// Nullable integer column.
    pub fn opt_i64(&self, name: &str) -> StoreResult<Option<i64>> {
        match self.get(name) {
            Some(Value::Null) => Ok(None),
            Some(Value::Int(v)) => Ok(Some(*v)),
            Some(other) => Err(StoreError::ColumnError(format!(
                "column '{name}' is not an integer: {other:?}"
            ))),
            None => Err(StoreError::ColumnError(format!("no column '{name}'"))),
        }
    }

    /// Required text column.
    pub fn try_str(&self, name: &str) -> StoreResult<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Ok(s),
            Some(other) => Err(StoreError::ColumnError(format!(
                "column '{name}' is not text: {other:?}"
            ))),
            None => Err(StoreError::ColumnError(format!("no column '{name}'"))),
        }
    }
}

/// A fully materialized query result.
///
/// Materializing eagerly means callers never hold an open cursor, so one
/// store connection can serve interleaved query/update sequences.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Arc<Vec<String>>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Collect one text column across all rows.
    pub fn column_strings(&self, name: &str) -> StoreResult<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.try_str(name).map(|s| s.to_string()))
            .collect()
    }

    /// Collect one integer column across all rows.
    pub fn column_i64s(&self, name: &str) -> StoreResult<Vec<i64>> {
        self.rows.iter().map(|r| r.try_i64(name)).collect()
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
