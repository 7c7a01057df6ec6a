//! Core type definitions for schema representation.

use serde::{Deserialize, Serialize};

use crate::naming::quote_identifier;

/// SQL type used for columns without an override.
pub const DEFAULT_SQL_TYPE: &str = "TEXT";

/// A user-supplied SQL type for one column of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTypeOverride {
    /// Header the override applies to, matched exactly.
    #[serde(alias = "column_name")]
    pub column_name: String,
    /// SQL type to declare, e.g. `INTEGER` or `real`.
    #[serde(alias = "column_type")]
    pub column_type: String,
}

impl ColumnTypeOverride {
    pub fn new(column_name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            column_type: column_type.into(),
        }
    }
}

/// One column of a table schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name, as it appeared in the header row.
    pub name: String,
    /// Declared SQL type, upper case.
    pub sql_type: String,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }

    /// Whether this column kept the default text type.
    pub fn is_default_type(&self) -> bool {
        self.sql_type == DEFAULT_SQL_TYPE
    }
}

/// Schema for an entire table: its name plus columns in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Sanitized table name.
    pub table: String,
    /// Column definitions, one per header.
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Create a table schema with the given columns.
    pub fn new(table: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `CREATE TABLE` statement for this schema, identifiers quoted.
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.sql_type))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE {} ({});", quote_identifier(&self.table), columns)
    }
}
