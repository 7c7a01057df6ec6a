//! Builds table schemas from parsed headers and column type overrides.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::{ColumnDef, ColumnTypeOverride, DEFAULT_SQL_TYPE, TableSchema};

/// An override naming a column that the table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanOverride {
    /// Table the override was configured for.
    pub table: String,
    /// Column the override named.
    pub column_name: String,
    /// Type the override would have applied.
    pub column_type: String,
}

impl fmt::Display for OrphanOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ignoring type override '{}' for column '{}': table '{}' has no such column",
            self.column_type, self.column_name, self.table
        )
    }
}

/// A compiled schema and the overrides that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSchema {
    pub schema: TableSchema,
    pub warnings: Vec<OrphanOverride>,
}

/// Compile headers and optional overrides into a [`TableSchema`].
///
/// Every header yields one column, in order, typed with the matching
/// override (upper-cased) or [`DEFAULT_SQL_TYPE`]. When several overrides
/// name the same column the last one wins. Overrides for unknown columns
/// are reported in `warnings` and never applied.
pub fn compile<S: AsRef<str>>(
    table: &str,
    headers: &[S],
    overrides: Option<&[ColumnTypeOverride]>,
) -> CompiledSchema {
    let mut by_column: IndexMap<&str, &str> = IndexMap::new();
    for o in overrides.unwrap_or_default() {
        by_column.insert(o.column_name.as_str(), o.column_type.as_str());
    }

    let known: HashSet<&str> = headers.iter().map(|h| h.as_ref()).collect();
    let warnings: Vec<OrphanOverride> = by_column
        .iter()
        .filter(|(column, _)| !known.contains(**column))
        .map(|(column, column_type)| OrphanOverride {
            table: table.to_string(),
            column_name: column.to_string(),
            column_type: column_type.to_string(),
        })
        .collect();

    for orphan in &warnings {
        warn!(table = %orphan.table, column = %orphan.column_name, "{}", orphan);
    }

    let columns = headers
        .iter()
        .map(|header| {
            let header = header.as_ref();
            let sql_type = by_column
                .get(header)
                .map(|t| t.trim().to_uppercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_SQL_TYPE.to_string());
            ColumnDef::new(header, sql_type)
        })
        .collect();

    CompiledSchema {
        schema: TableSchema::new(table, columns),
        warnings,
    }
}
