//! Tables command - list user tables and their row counts.

use std::path::PathBuf;

use colored::Colorize;
use tabload::SqliteEngine;

pub fn run(db: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !db.exists() {
        return Err(format!("Database not found: {}", db.display()).into());
    }

    let engine = SqliteEngine::open(&db)?;
    let tables = engine.list_tables()?;

    if tables.is_empty() {
        println!("{}", "No tables.".yellow());
        return Ok(());
    }

    for table in &tables {
        if verbose {
            println!("{:<32} {}", table.white().bold(), engine.row_count(table)?);
        } else {
            println!("{}", table);
        }
    }
    Ok(())
}
