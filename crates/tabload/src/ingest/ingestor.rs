//! Fetch, parse, compile and load every configured source.

use futures::future::join_all;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use crate::config::{IngestConfig, SourceConfig};
use crate::engine::StorageEngine;
use crate::error::Result;
use crate::fetch::TextFetcher;
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::load::{BulkLoader, LoaderConfig};
use crate::naming::derive_name;
use crate::schema::compile;

use super::events::{EventSink, LoadEvent};
use super::report::{IngestReport, SourceOutcome};

/// A source whose text has been fetched and parsed.
struct PreparedSource<'a> {
    source: &'a SourceConfig,
    table: DataTable,
    metadata: SourceMetadata,
}

/// Loads configured sources into a storage engine.
///
/// Fetching and parsing run concurrently for all sources. Table creation and
/// loading then run one source at a time, in configuration order, so tables
/// are created in a predictable order. A failure in one source is recorded
/// in the [`IngestReport`] and never stops the others.
pub struct Ingestor<F> {
    fetcher: F,
    loader: BulkLoader,
    events: EventSink,
}

impl<F: TextFetcher> Ingestor<F> {
    /// Create an ingestor with the default loader configuration.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            loader: BulkLoader::new(),
            events: EventSink::default(),
        }
    }

    /// Create an ingestor using the loader settings from `config`.
    pub fn from_config(fetcher: F, config: &IngestConfig) -> Self {
        Self::new(fetcher).with_loader_config(config.loader.clone())
    }

    /// Send progress events to `sender`.
    pub fn with_events(mut self, sender: UnboundedSender<LoadEvent>) -> Self {
        self.events = EventSink::new(sender);
        self
    }

    pub fn with_loader_config(mut self, config: LoaderConfig) -> Self {
        self.loader = BulkLoader::with_config(config);
        self
    }

    /// Ingest every source into `engine`.
    pub async fn ingest<E>(&self, engine: &mut E, sources: &[SourceConfig]) -> IngestReport
    where
        E: StorageEngine + ?Sized,
    {
        info!(sources = sources.len(), "Starting ingest");

        let prepared = join_all(sources.iter().map(|source| self.prepare(source))).await;

        let mut report = IngestReport::default();
        for (source, result) in sources.iter().zip(prepared) {
            let outcome = match result {
                Ok(prepared) => self.load_source(engine, prepared),
                Err(e) => {
                    let error = format!(
                        "Failed to process {} data from {}: {}",
                        source.kind.as_str().to_uppercase(),
                        source.url,
                        e
                    );
                    self.failed(&source.url, error)
                }
            };
            report.outcomes.push(outcome);
        }

        self.events.emit(LoadEvent::Finished);
        info!(
            loaded = report.loaded_count(),
            failed = report.failed_count(),
            rows = report.rows_inserted(),
            "Ingest finished"
        );
        report
    }

    /// Ingest the sources listed in `config`.
    pub async fn run<E>(&self, engine: &mut E, config: &IngestConfig) -> IngestReport
    where
        E: StorageEngine + ?Sized,
    {
        self.ingest(engine, &config.sources).await
    }

    async fn prepare<'a>(&self, source: &'a SourceConfig) -> Result<PreparedSource<'a>> {
        self.events.emit(LoadEvent::status(format!(
            "Fetching data from {} (type: {})...",
            source.url, source.kind
        )));
        let text = self.fetcher.fetch(&source.url).await?;
        self.events.emit(LoadEvent::status(format!(
            "Data fetched successfully from {}.",
            source.url
        )));

        let table = Parser::with_config(source.parser_config()).parse(Some(text.as_str()));
        let metadata = SourceMetadata::new(&source.url, source.kind, &text, &table);
        debug!(
            url = %source.url,
            columns = table.column_count(),
            rows = table.row_count(),
            "Parsed source"
        );

        Ok(PreparedSource {
            source,
            table,
            metadata,
        })
    }

    fn load_source<E>(&self, engine: &mut E, prepared: PreparedSource<'_>) -> SourceOutcome
    where
        E: StorageEngine + ?Sized,
    {
        let PreparedSource {
            source,
            table,
            metadata,
        } = prepared;
        let kind = source.kind.as_str().to_uppercase();

        if table.rows.is_empty() {
            let reason = format!(
                "No data rows found in {} from {}. Skipping table creation.",
                kind, source.url
            );
            self.events.emit(LoadEvent::status(reason.clone()));
            return SourceOutcome::Skipped {
                url: source.url.clone(),
                reason,
            };
        }

        let name = derive_name(&source.url, source.table_name.as_deref());
        let compiled = compile(&name, &table.headers, Some(source.column_type_overrides.as_slice()));

        let mut warnings: Vec<String> = compiled.warnings.iter().map(|w| w.to_string()).collect();
        for warning in &warnings {
            self.events.emit(LoadEvent::warning(warning.clone()));
        }

        let outcome = match self.loader.load(engine, &compiled.schema, &table.rows) {
            Ok(outcome) => outcome,
            Err(e) => {
                let error = format!(
                    "Database error for {} ({} from {}): {}",
                    name, kind, source.url, e
                );
                return self.failed(&source.url, error);
            }
        };

        self.events.emit(LoadEvent::status(format!(
            "Table \"{}\" created with headers: {}.",
            name,
            table.headers.join(", ")
        )));

        if outcome.rows_skipped > 0 {
            let warning = format!(
                "Skipped {} malformed rows in \"{}\" (header/value count mismatch).",
                outcome.rows_skipped, name
            );
            self.events.emit(LoadEvent::warning(warning.clone()));
            warnings.push(warning);
        }

        if outcome.rows_inserted > 0 {
            self.events.emit(LoadEvent::status(format!(
                "Inserted {} rows into \"{}\".",
                outcome.rows_inserted, name
            )));
        } else {
            self.events.emit(LoadEvent::status(format!(
                "No valid rows inserted into \"{}\".",
                name
            )));
        }

        self.events.emit(LoadEvent::TableAdded {
            table: name.clone(),
        });
        self.events.emit(LoadEvent::status(format!(
            "Data from {} loaded into table \"{}\".",
            source.url, name
        )));

        SourceOutcome::Loaded {
            table: name,
            rows_inserted: outcome.rows_inserted,
            rows_skipped: outcome.rows_skipped,
            warnings,
            metadata,
        }
    }

    fn failed(&self, url: &str, error: String) -> SourceOutcome {
        self.events.emit(LoadEvent::SourceFailed {
            url: url.to_string(),
            error: error.clone(),
        });
        SourceOutcome::Failed {
            url: url.to_string(),
            error,
        }
    }
}
