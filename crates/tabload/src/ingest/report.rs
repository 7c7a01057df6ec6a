//! Per-source results of an ingest run.

use serde::{Deserialize, Serialize};

use crate::input::SourceMetadata;

/// What happened to one configured source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SourceOutcome {
    /// A table was created and filled.
    Loaded {
        table: String,
        rows_inserted: usize,
        rows_skipped: usize,
        warnings: Vec<String>,
        metadata: SourceMetadata,
    },
    /// The source had nothing to load.
    Skipped { url: String, reason: String },
    /// The source could not be fetched, parsed or loaded.
    Failed { url: String, error: String },
}

impl SourceOutcome {
    /// Table name, for loaded sources.
    pub fn table(&self) -> Option<&str> {
        match self {
            SourceOutcome::Loaded { table, .. } => Some(table),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SourceOutcome::Loaded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SourceOutcome::Failed { .. })
    }
}

/// Outcomes of an ingest run, in configuration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub outcomes: Vec<SourceOutcome>,
}

impl IngestReport {
    /// Names of the tables that were loaded, in creation order.
    pub fn tables(&self) -> Vec<&str> {
        self.outcomes.iter().filter_map(SourceOutcome::table).collect()
    }

    /// The first table loaded, used for the initial query.
    pub fn first_table(&self) -> Option<&str> {
        self.outcomes.iter().find_map(SourceOutcome::table)
    }

    /// Total rows committed across every table.
    pub fn rows_inserted(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                SourceOutcome::Loaded { rows_inserted, .. } => *rows_inserted,
                _ => 0,
            })
            .sum()
    }

    pub fn loaded_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_loaded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// True if no source failed.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }
}
