//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tabload: load CSV/TSV sources into SQLite and query them
#[derive(Parser)]
#[command(name = "tabload")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every source in a config file, then run a query
    Load {
        /// Path to the source configuration (JSON)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Database file to load into (default: in-memory)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Query to run after loading (default: first rows of the first table)
        #[arg(short, long)]
        query: Option<String>,

        /// Output format for query results
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Run SQL against a database file
    Query {
        /// Path to the database file
        #[arg(value_name = "DB")]
        db: PathBuf,

        /// SQL to execute. May contain several statements.
        #[arg(value_name = "SQL")]
        sql: String,

        /// Output format for query results
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the tables in a database file
    Tables {
        /// Path to the database file
        #[arg(value_name = "DB")]
        db: PathBuf,
    },
}

/// How query results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
    Tsv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown format: {}. Use table, json, csv, or tsv.", s)),
        }
    }
}
