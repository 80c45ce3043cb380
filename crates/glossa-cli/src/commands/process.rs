//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use glossa_extractor::Pipeline;
use glossa_llm::AnthropicProvider;
use glossa_store::SqliteStore;
use std::sync::Arc;
use tracing::debug;

/// Execute the process command.
pub async fn execute_process(
    args: ProcessArgs,
    config: &Config,
    store: Arc<SqliteStore>,
    formatter: &Formatter,
) -> Result<()> {
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            CliError::Config("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;

    let provider = AnthropicProvider::new(config.llm_config(api_key))?;
    debug!("Using model {}", provider.model());

    let pipeline = Pipeline::new(provider, store, config.extractor.clone())?;
    let language = pipeline
        .language_or_default(args.language.as_deref())
        .to_string();

    let result = pipeline.process(&args.file, &language).await?;
    println!("{}", formatter.format_result(&result)?);

    Ok(())
}
