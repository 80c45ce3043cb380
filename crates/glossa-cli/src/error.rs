//! Error types for the CLI application.

use glossa_extractor::{ExtractorError, PipelineError};
use glossa_llm::LlmError;
use glossa_store::StoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database could not be opened
    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    /// A document run failed
    #[error("Processing failed: {0}")]
    Pipeline(#[from] PipelineError),

    /// A vocabulary operation failed
    #[error("{0}")]
    Vocabulary(#[from] ExtractorError),

    /// AI backend could not be set up
    #[error("AI backend error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
