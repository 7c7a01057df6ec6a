//! Raw statement results as produced by a storage engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value returned by the storage engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns true if this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Real(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
            Value::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Real(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<rusqlite::types::ValueRef<'_>> for Value {
    fn from(value: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;

        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(n) => Value::Integer(n),
            ValueRef::Real(x) => Value::Real(x),
            ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        }
    }
}

/// Result set of one executed statement.
///
/// Engines report a statement that produced no result set at all (DDL, most
/// DML) as `None` rather than as an empty `RawStatementResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatementResult {
    /// Column names in result order.
    pub columns: Vec<String>,
    /// Row data, positionally aligned with `columns`.
    pub rows: Vec<Vec<Value>>,
}

impl RawStatementResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Number of rows in the result set.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether every row has exactly one value per column.
    pub fn is_well_formed(&self) -> bool {
        if self.columns.is_empty() {
            return self.rows.is_empty();
        }
        self.rows.iter().all(|row| row.len() == self.columns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_json_is_untagged() {
        let values = vec![Value::Null, Value::Integer(1), Value::from(2.5), Value::from("x")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,1,2.5,"x"]"#);
    }

    #[test]
    fn test_well_formed() {
        let ok = RawStatementResult::new(vec!["a".into()], vec![vec![Value::Integer(1)]]);
        assert!(ok.is_well_formed());

        let ragged = RawStatementResult::new(vec!["a".into(), "b".into()], vec![vec![Value::Integer(1)]]);
        assert!(!ragged.is_well_formed());

        let headless = RawStatementResult::new(vec![], vec![vec![Value::Null]]);
        assert!(!headless.is_well_formed());
    }
}
