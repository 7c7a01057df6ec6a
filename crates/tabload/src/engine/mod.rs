//! Storage engine abstraction.
//!
//! The loader and the query path only need a handful of operations from the
//! SQL engine: run one statement, run a batch of statements, and bracket a
//! transaction. [`SqliteEngine`] implements them over an embedded SQLite
//! database.

mod sqlite;

pub use sqlite::SqliteEngine;

use crate::error::Result;
use crate::results::{NormalizedResult, RawStatementResult, normalize};

/// An embedded SQL engine handle.
///
/// Write operations take `&mut self`, so a handle that is inside a
/// transaction cannot be shared with another writer.
pub trait StorageEngine {
    /// Execute a single statement. Returns `None` for statements that do
    /// not produce a result set.
    fn execute(&mut self, sql: &str) -> Result<Option<RawStatementResult>>;

    /// Execute every statement in `sql`, in order, returning one entry per
    /// statement.
    fn query(&mut self, sql: &str) -> Result<Vec<Option<RawStatementResult>>>;

    /// Open a transaction. Fails if one is already open.
    fn begin(&mut self) -> Result<()>;

    /// Commit the open transaction.
    fn commit(&mut self) -> Result<()>;

    /// Roll back the open transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Whether a transaction is currently open.
    fn in_transaction(&self) -> bool;

    /// Execute `sql` and normalize the results for display.
    fn query_normalized(&mut self, sql: &str) -> Result<NormalizedResult> {
        let results = self.query(sql)?;
        Ok(normalize(&results))
    }
}
