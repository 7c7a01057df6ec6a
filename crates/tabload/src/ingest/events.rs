//! Progress events emitted while sources are ingested.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

/// A progress update from the ingestor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LoadEvent {
    /// Informational progress line.
    Status { message: String },
    /// Non-fatal problem, such as a type override naming a missing column.
    Warning { message: String },
    /// A table was created and loaded.
    TableAdded { table: String },
    /// A source could not be fetched, parsed or loaded.
    SourceFailed { url: String, error: String },
    /// Every source has been processed.
    Finished,
}

impl LoadEvent {
    pub fn status(message: impl Into<String>) -> Self {
        LoadEvent::Status {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        LoadEvent::Warning {
            message: message.into(),
        }
    }

    /// Whether this event reports a problem.
    pub fn is_problem(&self) -> bool {
        matches!(self, LoadEvent::Warning { .. } | LoadEvent::SourceFailed { .. })
    }
}

impl std::fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadEvent::Status { message } | LoadEvent::Warning { message } => f.write_str(message),
            LoadEvent::TableAdded { table } => write!(f, "Table \"{}\" is ready", table),
            LoadEvent::SourceFailed { url, error } => write!(f, "Failed to process {}: {}", url, error),
            LoadEvent::Finished => f.write_str("All data processing finished. Database ready for queries!"),
        }
    }
}

/// Optional event channel. Sending never fails from the caller's side.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    sender: Option<UnboundedSender<LoadEvent>>,
}

impl EventSink {
    pub(crate) fn new(sender: UnboundedSender<LoadEvent>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Log `event` and forward it to the channel, if any.
    pub(crate) fn emit(&self, event: LoadEvent) {
        if event.is_problem() {
            warn!(event = %event, "Ingest problem");
        } else {
            info!(event = %event, "Ingest progress");
        }

        if let Some(sender) = &self.sender {
            // A closed receiver only means nobody is listening any more.
            let _ = sender.send(event);
        }
    }
}
