//! Bulk loading of parsed rows into the storage engine.

mod loader;

pub use loader::{BulkLoader, LoadOutcome, LoaderConfig, load, quote_literal};
