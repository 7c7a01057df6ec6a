//! Query command - run SQL against a database file.

use std::path::PathBuf;

use tabload::{SqliteEngine, StorageEngine};

use crate::cli::OutputFormat;
use crate::output::print_result;

pub fn run(
    db: PathBuf,
    sql: String,
    format: OutputFormat,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !db.exists() {
        return Err(format!("Database not found: {}", db.display()).into());
    }

    let mut engine = SqliteEngine::open(&db)?;
    let result = engine.query_normalized(&sql)?;
    print_result(&result, format)
}
