//! Source and ingest configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabloadError};
use crate::fetch::FetchConfig;
use crate::input::{ParserConfig, SourceKind};
use crate::load::LoaderConfig;
use crate::schema::ColumnTypeOverride;

/// One data source to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    /// URL or local path of the delimited text.
    pub url: String,
    /// Format of the text. `type` is accepted as an alias.
    #[serde(alias = "type")]
    pub kind: SourceKind,
    /// Table name to use instead of one derived from the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Per-column SQL types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_type_overrides: Vec<ColumnTypeOverride>,
    /// Columns to drop while parsing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_columns: Vec<String>,
}

impl SourceConfig {
    /// A source with no overrides or exclusions.
    pub fn new(url: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            url: url.into(),
            kind,
            table_name: None,
            column_type_overrides: Vec::new(),
            excluded_columns: Vec::new(),
        }
    }

    /// Set an explicit table name.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Add a column type override.
    pub fn with_override(mut self, column: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.column_type_overrides
            .push(ColumnTypeOverride::new(column, sql_type));
        self
    }

    /// Exclude a column from parsing.
    pub fn with_excluded_column(mut self, column: impl Into<String>) -> Self {
        self.excluded_columns.push(column.into());
        self
    }

    /// Parser configuration for this source.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::for_kind(self.kind).with_excluded_columns(self.excluded_columns.iter().cloned())
    }
}

/// Everything needed to run an ingest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestConfig {
    /// Sources, in the order their tables are created.
    pub sources: Vec<SourceConfig>,
    /// Bulk loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Fetcher settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl IngestConfig {
    /// Config for the given sources with default settings.
    pub fn with_sources(sources: Vec<SourceConfig>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file and validate it.
    ///
    /// The file may hold either a full config object or a bare array of
    /// sources.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TabloadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        let config = Self::from_json(value)?;
        config.validate()?;
        Ok(config)
    }

    fn from_json(value: serde_json::Value) -> Result<Self> {
        if value.is_array() {
            let sources: Vec<SourceConfig> = serde_json::from_value(value)?;
            return Ok(Self::with_sources(sources));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Check the configuration for values that can never load.
    pub fn validate(&self) -> Result<()> {
        for (index, source) in self.sources.iter().enumerate() {
            if source.url.trim().is_empty() {
                return Err(TabloadError::Config(format!(
                    "source #{} has an empty url",
                    index + 1
                )));
            }
        }
        if self.loader.batch_size == 0 {
            return Err(TabloadError::Config("loader.batchSize must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"{
                "sources": [
                    { "url": "https://x/books.tsv", "kind": "tsv", "tableName": "books",
                      "columnTypeOverrides": [{ "columnName": "year", "columnType": "integer" }] },
                    { "url": "https://x/cats.csv", "type": "csv", "excludedColumns": ["notes"] }
                ],
                "loader": { "batchSize": 50 }
            }"#,
        );

        let config = IngestConfig::from_file(file.path()).unwrap();

        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].kind, SourceKind::Tsv);
        assert_eq!(config.sources[0].table_name.as_deref(), Some("books"));
        assert_eq!(
            config.sources[0].column_type_overrides,
            vec![ColumnTypeOverride::new("year", "integer")]
        );
        assert_eq!(config.sources[1].excluded_columns, vec!["notes"]);
        assert_eq!(config.loader.batch_size, 50);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_bare_source_array() {
        let file = write_config(r#"[{ "url": "data/a.csv", "kind": "csv" }]"#);
        let config = IngestConfig::from_file(file.path()).unwrap();
        assert_eq!(config.sources, vec![SourceConfig::new("data/a.csv", SourceKind::Csv)]);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let file = write_config(r#"[{ "url": "a.json", "kind": "json" }]"#);
        assert!(matches!(
            IngestConfig::from_file(file.path()),
            Err(TabloadError::Json(_))
        ));
    }

    #[test]
    fn test_empty_url_rejected() {
        let file = write_config(r#"[{ "url": "  ", "kind": "csv" }]"#);
        assert!(matches!(
            IngestConfig::from_file(file.path()),
            Err(TabloadError::Config(_))
        ));
    }

    #[test]
    fn test_parser_config_follows_source() {
        let source = SourceConfig::new("a.tsv", SourceKind::Tsv).with_excluded_column("x");
        let parser = source.parser_config();
        assert_eq!(parser.delimiter, "\t");
        assert_eq!(parser.excluded_columns, vec!["x"]);
    }
}
