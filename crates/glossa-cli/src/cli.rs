//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use glossa_domain::VocabularyId;
use std::path::PathBuf;

/// Glossa - Build a vocabulary list from your language-course notes.
#[derive(Debug, Parser)]
#[command(name = "glossa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.glossa/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH", global = true)]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs and counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract vocabulary from a PDF or DOCX document
    Process(ProcessArgs),

    /// List stored vocabulary
    List(ListArgs),

    /// Show one vocabulary item
    Show(ShowArgs),

    /// Delete one vocabulary item
    Delete(DeleteArgs),

    /// Export all vocabulary to a JSON file
    Export(ExportArgs),

    /// Show vocabulary counts
    Stats,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Document to process (.pdf or .docx, at most 10 MiB)
    pub file: PathBuf,

    /// Language of the course notes (default from config)
    #[arg(short, long, env = "LANGUAGE")]
    pub language: Option<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Only show items with this language label
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Vocabulary ID
    pub id: VocabularyId,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Vocabulary ID
    pub id: VocabularyId,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Destination JSON file
    pub path: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
