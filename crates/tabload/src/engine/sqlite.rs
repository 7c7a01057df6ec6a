//! SQLite storage engine.

use std::path::Path;

use rusqlite::{Batch, Connection, Statement};
use tracing::{debug, info};

use crate::error::{Result, TabloadError};
use crate::naming::quote_identifier;
use crate::results::{RawStatementResult, Value};

use super::StorageEngine;

/// An embedded SQLite database.
pub struct SqliteEngine {
    conn: Connection,
}

impl SqliteEngine {
    /// Open a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        info!("SQLite engine initialized (in-memory)");
        Ok(Self { conn })
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "SQLite engine initialized");
        Ok(Self { conn })
    }

    /// Wrap an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Names of all user tables, in creation order.
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Number of rows currently stored in `table`.
    pub fn row_count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl StorageEngine for SqliteEngine {
    fn execute(&mut self, sql: &str) -> Result<Option<RawStatementResult>> {
        let mut stmt = self.conn.prepare(sql)?;
        run_statement(&mut stmt)
    }

    fn query(&mut self, sql: &str) -> Result<Vec<Option<RawStatementResult>>> {
        let mut batch = Batch::new(&self.conn, sql);
        let mut results = Vec::new();
        while let Some(mut stmt) = batch.next()? {
            results.push(run_statement(&mut stmt)?);
        }
        debug!(statements = results.len(), "Executed query batch");
        Ok(results)
    }

    fn begin(&mut self) -> Result<()> {
        if self.in_transaction() {
            return Err(TabloadError::TransactionActive);
        }
        self.conn.execute_batch("BEGIN TRANSACTION;")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if !self.in_transaction() {
            return Err(TabloadError::NoTransaction);
        }
        self.conn.execute_batch("COMMIT;")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if !self.in_transaction() {
            return Err(TabloadError::NoTransaction);
        }
        self.conn.execute_batch("ROLLBACK;")?;
        Ok(())
    }

    fn in_transaction(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

/// Run a prepared statement and collect its result set, if it has one.
fn run_statement(stmt: &mut Statement<'_>) -> Result<Option<RawStatementResult>> {
    if stmt.column_count() == 0 {
        stmt.execute([])?;
        return Ok(None);
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut values = Vec::with_capacity(width);
        for i in 0..width {
            values.push(Value::from(row.get_ref(i)?));
        }
        rows.push(values);
    }

    Ok(Some(RawStatementResult::new(columns, rows)))
}
