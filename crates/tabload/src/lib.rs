//! Tabload: load delimited text sources into an embedded SQL database.
//!
//! Each configured source (CSV or TSV, over HTTP or from disk) is parsed
//! into headers and rows, given a sanitized table name and a typed schema,
//! and bulk loaded in a single transaction. Queries against the loaded
//! tables come back as row objects or status messages ready for display.
//!
//! # Core Principles
//!
//! - **Forgiving input**: Ragged rows are padded or truncated, never rejected
//! - **Atomic tables**: A table's rows are committed together or not at all
//! - **Isolated sources**: One bad source never stops the others
//!
//! # Example
//!
//! ```no_run
//! use tabload::{IngestConfig, Ingestor, SourceFetcher, SqliteEngine, StorageEngine};
//!
//! # async fn run() -> tabload::Result<()> {
//! let config = IngestConfig::from_file("sources.json")?;
//! let mut engine = SqliteEngine::open_in_memory()?;
//!
//! let ingestor = Ingestor::from_config(SourceFetcher::with_config(&config.fetch)?, &config);
//! let report = ingestor.run(&mut engine, &config).await;
//!
//! if let Some(table) = report.first_table() {
//!     let result = engine.query_normalized(&format!("SELECT * FROM \"{}\" LIMIT 5;", table))?;
//!     println!("{:?}", result);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod input;
pub mod load;
pub mod naming;
pub mod results;
pub mod schema;

pub use config::{IngestConfig, SourceConfig};
pub use engine::{SqliteEngine, StorageEngine};
pub use error::{Result, TabloadError};
pub use fetch::{FetchConfig, SourceFetcher, TextFetcher};
pub use ingest::{IngestReport, Ingestor, LoadEvent, SourceOutcome};
pub use input::{DataTable, Parser, ParserConfig, SourceKind, SourceMetadata, parse_delimited};
pub use load::{BulkLoader, LoadOutcome, LoaderConfig};
pub use naming::{derive_name, quote_identifier, sanitize};
pub use results::{NormalizedResult, RawStatementResult, StatementOutcome, Value, normalize};
pub use schema::{ColumnTypeOverride, CompiledSchema, TableSchema, compile};
