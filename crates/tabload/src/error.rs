//! Error types for the tabload library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tabload operations.
#[derive(Debug, Error)]
pub enum TabloadError {
    /// Error reading a local source file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote server answered with a non-success status.
    #[error("HTTP error {status} while fetching '{url}'")]
    Http { url: String, status: u16 },

    /// Transport-level failure while fetching a source.
    #[error("Network error while fetching '{url}': {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Error reported by the embedded SQLite engine.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Error reported by a non-SQLite storage engine.
    #[error("Storage error: {0}")]
    Storage(String),

    /// `begin` was called while a transaction is already open.
    #[error("A transaction is already open on this engine")]
    TransactionActive,

    /// `commit` or `rollback` was called with no open transaction.
    #[error("No transaction is open on this engine")]
    NoTransaction,

    /// A table schema without any columns cannot be created.
    #[error("Table '{0}' has no columns")]
    EmptySchema(String),

    /// Bulk load of a single table failed and was rolled back.
    #[error("Load of table '{table}' failed: {source}")]
    Load {
        table: String,
        #[source]
        source: Box<TabloadError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TabloadError {
    /// Wrap an error as the failure of loading `table`.
    pub fn load(table: impl Into<String>, source: TabloadError) -> Self {
        TabloadError::Load {
            table: table.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for tabload operations.
pub type Result<T> = std::result::Result<T, TabloadError>;
