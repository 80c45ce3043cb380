//! Glossa CLI - Extract and manage vocabulary from language-course notes.

use clap::Parser;
use glossa_cli::commands::{self, VocabularyCatalog};
use glossa_cli::{Cli, Command, Config, Formatter, OutputFormat};
use glossa_store::SqliteStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color_enabled = !cli.no_color;

    if let Err(e) = run(cli).await {
        let formatter = Formatter::new(OutputFormat::Table, color_enabled);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> glossa_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let database = cli
        .database
        .clone()
        .unwrap_or_else(|| config.database_path.clone());
    let store = Arc::new(SqliteStore::new(&database)?);
    let catalog = VocabularyCatalog::new(Arc::clone(&store));

    match cli.command {
        Command::Process(args) => {
            commands::execute_process(args, &config, store, &formatter).await?;
        }
        Command::List(args) => commands::execute_list(args, &catalog, &formatter)?,
        Command::Show(args) => commands::execute_show(args, &catalog, &formatter)?,
        Command::Delete(args) => commands::execute_delete(args, &catalog, &formatter)?,
        Command::Export(args) => commands::execute_export(args, &catalog, &formatter)?,
        Command::Stats => commands::execute_stats(&catalog, &formatter)?,
    }

    Ok(())
}
