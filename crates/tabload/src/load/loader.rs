//! Transactional bulk loading of parsed rows.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::engine::StorageEngine;
use crate::error::{Result, TabloadError};
use crate::naming::quote_identifier;
use crate::schema::TableSchema;

/// Loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoaderConfig {
    /// Rows per `INSERT` statement. All statements share one transaction.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: 500 }
    }
}

/// Result of loading one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Table the rows went into.
    pub table: String,
    /// Rows committed.
    pub rows_inserted: usize,
    /// Rows dropped because their width did not match the header count.
    pub rows_skipped: usize,
}

/// Creates a table and fills it inside a single transaction.
#[derive(Debug, Clone, Default)]
pub struct BulkLoader {
    config: LoaderConfig,
}

impl BulkLoader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Create the table described by `schema` and insert `rows` into it.
    ///
    /// Rows whose width differs from the column count are skipped with a
    /// warning. When no valid rows remain the table is created empty and no
    /// insert is issued. Otherwise every row is inserted in one transaction:
    /// either all of them are committed or, on any failure, none are and a
    /// [`TabloadError::Load`] is returned.
    pub fn load<E, R>(&self, engine: &mut E, schema: &TableSchema, rows: &[R]) -> Result<LoadOutcome>
    where
        E: StorageEngine + ?Sized,
        R: AsRef<[String]>,
    {
        let table = schema.table.as_str();
        if schema.columns.is_empty() {
            return Err(TabloadError::EmptySchema(table.to_string()));
        }

        engine
            .execute(&schema.create_table_sql())
            .map_err(|e| TabloadError::load(table, e))?;
        debug!(table, columns = schema.column_count(), "Created table");

        let width = schema.column_count();
        let (valid, skipped): (Vec<&[String]>, Vec<&[String]>) = rows
            .iter()
            .map(|r| r.as_ref())
            .partition(|r| r.len() == width);

        for row in &skipped {
            warn!(
                table,
                expected = width,
                found = row.len(),
                row = %row.join(","),
                "Skipping malformed row (header/value count mismatch)"
            );
        }

        let mut outcome = LoadOutcome {
            table: table.to_string(),
            rows_inserted: 0,
            rows_skipped: skipped.len(),
        };
        if valid.is_empty() {
            info!(table, "No valid rows to insert");
            return Ok(outcome);
        }

        engine.begin()?;
        let inserted = self
            .insert_batches(engine, table, &valid)
            .and_then(|_| engine.commit());

        if let Err(e) = inserted {
            if engine.in_transaction() {
                if let Err(rollback_err) = engine.rollback() {
                    error!(table, error = %rollback_err, "Rollback failed");
                }
            }
            error!(table, error = %e, "Transaction error during data insertion, rolled back");
            return Err(TabloadError::load(table, e));
        }

        outcome.rows_inserted = valid.len();
        info!(table, rows = outcome.rows_inserted, "Inserted rows");
        Ok(outcome)
    }

    fn insert_batches<E>(&self, engine: &mut E, table: &str, rows: &[&[String]]) -> Result<()>
    where
        E: StorageEngine + ?Sized,
    {
        for chunk in rows.chunks(self.config.batch_size.max(1)) {
            engine.execute(&insert_sql(table, chunk))?;
        }
        Ok(())
    }
}

/// Load with the default configuration.
pub fn load<E, R>(engine: &mut E, schema: &TableSchema, rows: &[R]) -> Result<LoadOutcome>
where
    E: StorageEngine + ?Sized,
    R: AsRef<[String]>,
{
    BulkLoader::new().load(engine, schema, rows)
}

/// Multi-row `INSERT` statement with every value as an escaped literal.
fn insert_sql(table: &str, rows: &[&[String]]) -> String {
    let values = rows
        .iter()
        .map(|row| {
            let cells = row.iter().map(|v| quote_literal(v)).collect::<Vec<_>>();
            format!("({})", cells.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} VALUES {};", quote_identifier(table), values)
}

/// Quote a string as an SQL literal, doubling single quotes.
///
/// SQLite stops tokenizing at a NUL byte, so embedded NULs are spliced in
/// with `char(0)` instead of appearing inside the quotes.
pub fn quote_literal(value: &str) -> String {
    value
        .split('\0')
        .map(|part| format!("'{}'", part.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(" || char(0) || ")
}
