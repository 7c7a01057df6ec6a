//! Orchestration of fetch, parse, schema compilation and loading.

mod events;
mod ingestor;
mod report;

pub use events::LoadEvent;
pub use ingestor::Ingestor;
pub use report::{IngestReport, SourceOutcome};
