//! Load command - ingest every configured source, then run a query.

use std::path::PathBuf;

use colored::Colorize;
use tabload::{
    IngestConfig, IngestReport, Ingestor, LoadEvent, SourceFetcher, SourceOutcome, SqliteEngine,
    StorageEngine, quote_identifier,
};
use tokio::sync::mpsc;

use crate::cli::OutputFormat;
use crate::output::print_result;

pub async fn run(
    config_path: PathBuf,
    db: Option<PathBuf>,
    query: Option<String>,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = IngestConfig::from_file(&config_path)?;
    let mut engine = match &db {
        Some(path) => SqliteEngine::open(path)?,
        None => SqliteEngine::open_in_memory()?,
    };

    eprintln!(
        "{} {} sources from {}",
        "Loading".cyan().bold(),
        config.sources.len(),
        config_path.display().to_string().white()
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            print_event(&event, verbose);
        }
    });

    let fetcher = SourceFetcher::with_config(&config.fetch)?;
    let ingestor = Ingestor::from_config(fetcher, &config).with_events(tx);
    let report = ingestor.run(&mut engine, &config).await;
    drop(ingestor);
    printer.await?;

    print_summary(&report);

    let sql = match query {
        Some(sql) => sql,
        None => match report.first_table() {
            Some(table) => initial_query(table),
            None => {
                eprintln!("{}", "No tables were loaded; nothing to query.".yellow());
                return Ok(());
            }
        },
    };

    eprintln!("{} {}", "Query:".cyan().bold(), sql);
    let result = engine.query_normalized(&sql)?;
    print_result(&result, format)
}

/// First rows of `table`, shown when no query was given.
fn initial_query(table: &str) -> String {
    format!("SELECT * FROM {} LIMIT 5;", quote_identifier(table))
}

fn print_event(event: &LoadEvent, verbose: bool) {
    match event {
        LoadEvent::Status { message } => {
            if verbose {
                eprintln!("  {}", message.dimmed());
            }
        }
        LoadEvent::Warning { message } => eprintln!("  {} {}", "warning:".yellow().bold(), message),
        LoadEvent::TableAdded { table } => eprintln!("  {} {}", "+".green().bold(), table.green()),
        LoadEvent::SourceFailed { error, .. } => eprintln!("  {} {}", "error:".red().bold(), error),
        LoadEvent::Finished => eprintln!("  {}", event.to_string().dimmed()),
    }
}

fn print_summary(report: &IngestReport) {
    eprintln!();
    eprintln!("{}", "Summary".cyan().bold());
    for outcome in &report.outcomes {
        match outcome {
            SourceOutcome::Loaded {
                table,
                rows_inserted,
                rows_skipped,
                ..
            } => {
                let skipped = if *rows_skipped > 0 {
                    format!(", {} skipped", rows_skipped).yellow().to_string()
                } else {
                    String::new()
                };
                eprintln!("  {:<24} {} rows{}", table.white().bold(), rows_inserted, skipped);
            }
            SourceOutcome::Skipped { url, .. } => {
                eprintln!("  {:<24} {}", "skipped".yellow(), url);
            }
            SourceOutcome::Failed { url, .. } => {
                eprintln!("  {:<24} {}", "failed".red(), url);
            }
        }
    }
    eprintln!(
        "  {} tables, {} rows, {} failed",
        report.loaded_count(),
        report.rows_inserted(),
        report.failed_count()
    );
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_quotes_table() {
        assert_eq!(initial_query("books"), "SELECT * FROM \"books\" LIMIT 5;");
    }
}
