//! Delimited text parser.
//!
//! The parser is deliberately forgiving: ragged rows are padded or truncated
//! to the header width and blank lines become rows of empty cells, so every
//! parsed row has exactly as many cells as there are headers.

use super::source::{DataTable, SourceKind};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Cell delimiter. May be longer than one character.
    pub delimiter: String,
    /// Header names to drop, matched exactly against trimmed headers.
    pub excluded_columns: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: SourceKind::Csv.delimiter().to_string(),
            excluded_columns: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Configuration for a given source format.
    pub fn for_kind(kind: SourceKind) -> Self {
        Self {
            delimiter: kind.delimiter().to_string(),
            ..Self::default()
        }
    }

    /// Exclude the given columns from parsed output.
    pub fn with_excluded_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

/// Parses delimited text into a [`DataTable`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration (comma-separated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Create a parser for a given source format.
    pub fn for_kind(kind: SourceKind) -> Self {
        Self::with_config(ParserConfig::for_kind(kind))
    }

    /// The active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse text. `None` is treated as empty input.
    pub fn parse(&self, text: Option<&str>) -> DataTable {
        parse_delimited(text, &self.config.delimiter, &self.config.excluded_columns)
    }
}

/// Parse delimited text into headers and rows.
///
/// Never fails. Empty (or whitespace-only, or `None`) input yields a table
/// with no headers and no rows.
pub fn parse_delimited<S: AsRef<str>>(
    text: Option<&str>,
    delimiter: &str,
    excluded_columns: &[S],
) -> DataTable {
    let trimmed = text.unwrap_or("").trim();
    if trimmed.is_empty() {
        return DataTable::empty();
    }

    let mut lines = trimmed.split('\n');
    let all_headers = match lines.next() {
        Some(line) => split_cells(line, delimiter),
        None => return DataTable::empty(),
    };

    let kept: Vec<usize> = all_headers
        .iter()
        .enumerate()
        .filter(|(_, header)| !excluded_columns.iter().any(|e| e.as_ref() == **header))
        .map(|(index, _)| index)
        .collect();

    let headers = kept
        .iter()
        .map(|&index| all_headers[index].to_string())
        .collect();

    let rows = lines
        .map(|line| project_row(line, delimiter, &kept))
        .collect();

    DataTable::new(headers, rows)
}

/// Split a line on the delimiter and trim each cell.
fn split_cells<'a>(line: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![line.trim()];
    }
    line.split(delimiter).map(str::trim).collect()
}

/// Build one output row holding exactly `kept.len()` cells.
fn project_row(line: &str, delimiter: &str, kept: &[usize]) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return vec![String::new(); kept.len()];
    }

    let cells = split_cells(line, delimiter);
    kept.iter()
        .map(|&index| cells.get(index).map(|c| c.to_string()).unwrap_or_default())
        .collect()
}
