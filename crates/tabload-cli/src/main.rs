//! Tabload CLI - load delimited text sources and query them with SQL.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Load {
            config,
            db,
            query,
            format,
        } => commands::load::run(config, db, query, format, cli.verbose).await,

        Commands::Query { db, sql, format } => commands::query::run(db, sql, format, cli.verbose),

        Commands::Tables { db } => commands::tables::run(db, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "tabload=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
