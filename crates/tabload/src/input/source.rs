//! Parsed tables and metadata about where they came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Delimited text format of a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
}

impl SourceKind {
    /// The cell delimiter used by this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            SourceKind::Csv => ",",
            SourceKind::Tsv => "\t",
        }
    }

    /// Short lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Tsv => "tsv",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a fetched data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// URL or path the text was fetched from.
    pub url: String,
    /// Format of the source.
    pub kind: SourceKind,
    /// SHA-256 hash of the fetched text.
    pub hash: String,
    /// Size of the fetched text in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns after exclusion.
    pub column_count: usize,
    /// When the source was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe a source whose text has been fetched and parsed.
    pub fn new(url: impl Into<String>, kind: SourceKind, text: &str, table: &DataTable) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = format!("sha256:{:x}", hasher.finalize());

        Self {
            url: url.into(),
            kind,
            hash,
            size_bytes: text.len() as u64,
            row_count: table.row_count(),
            column_count: table.column_count(),
            fetched_at: Utc::now(),
        }
    }
}

/// Represents parsed tabular data.
///
/// Every row holds exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers, in source order. Not necessarily unique.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// An empty table with no header row.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get the first column with the given name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.headers.iter().position(|h| h == name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataTable {
        DataTable::new(
            vec!["id".into(), "name".into()],
            vec![
                vec!["1".into(), "Alice".into()],
                vec!["2".into(), "Bob".into()],
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let table = sample();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 1), Some("Bob"));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.column_by_name("name"), Some(vec!["Alice", "Bob"]));
        assert_eq!(table.column_by_name("missing"), None);
    }

    #[test]
    fn test_kind_delimiters() {
        assert_eq!(SourceKind::Csv.delimiter(), ",");
        assert_eq!(SourceKind::Tsv.delimiter(), "\t");
        assert_eq!(SourceKind::Tsv.to_string(), "tsv");
    }

    #[test]
    fn test_metadata_hash_and_counts() {
        let table = sample();
        let meta = SourceMetadata::new("https://x/people.csv", SourceKind::Csv, "abc", &table);
        assert!(meta.hash.starts_with("sha256:"));
        assert_eq!(meta.size_bytes, 3);
        assert_eq!(meta.row_count, 2);
        assert_eq!(meta.column_count, 2);
    }
}
