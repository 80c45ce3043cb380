//! Glossa Server
//!
//! HTTP front end for the vocabulary pipeline: document upload, vocabulary
//! browsing and deletion, JSON export, and stats.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use glossa_extractor::{ExtractorError, Pipeline};
use glossa_llm::{AnthropicProvider, LlmError};
use glossa_store::{SqliteStore, StoreError};
use handlers::{create_router, AppState, DynProvider};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Database could not be opened
    #[error("Database error: {0}")]
    Store(#[from] StoreError),

    /// AI backend could not be set up
    #[error("AI backend error: {0}")]
    Llm(#[from] LlmError),

    /// Pipeline could not be set up
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] ExtractorError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared handler state from configuration
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    config.validate()?;

    let store = Arc::new(SqliteStore::new(&config.database_path)?);
    let provider: DynProvider = Box::new(AnthropicProvider::new(config.llm_config())?);
    let pipeline = Pipeline::new(provider, store, config.extractor.clone())?;

    Ok(AppState::new(pipeline))
}

/// Start the HTTP server
///
/// Opens the database, builds the pipeline, and serves until the process
/// is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Glossa server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Default language: {}", config.extractor.default_language);

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
