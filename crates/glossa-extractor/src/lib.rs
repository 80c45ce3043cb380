//! Glossa Extractor
//!
//! Turns language-course documents into stored vocabulary.
//!
//! # Architecture
//!
//! ```text
//! path/upload → validate → decode → AI extract → commit → ProcessingResult
//! ```
//!
//! - **Validation**: blank path, existence, 10 MiB ceiling, `.pdf`/`.docx` only,
//!   plus a filename-safety check for uploads
//! - **Decoding**: PDF pages and DOCX paragraphs joined into plain text
//! - **Extraction**: one AI call under a deadline, fence-tolerant JSON parsing,
//!   trimming and in-response deduplication
//! - **Commit**: global dedup against the store; failed inserts count as skipped
//!
//! # Example Usage
//!
//! ```no_run
//! use glossa_extractor::{ExtractorConfig, Pipeline};
//! use glossa_llm::MockProvider;
//! use glossa_store::SqliteStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteStore::new("glossa.db")?);
//! let provider = MockProvider::new(r#"["hola"]"#);
//! let pipeline = Pipeline::new(provider, store, ExtractorConfig::default())?;
//!
//! let result = pipeline.process("lesson1.pdf", "Spanish").await?;
//! println!("{} new, {} skipped", result.new_vocabulary(), result.skipped_duplicates());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod catalog;
mod commit;
mod config;
mod decode;
mod error;
mod extractor;
mod parser;
mod pipeline;
mod prompt;
mod validate;


pub use catalog::Catalog;
pub use commit::{commit, CommitSummary};
pub use config::{ExtractorConfig, DEFAULT_LANGUAGE};
pub use decode::DocumentDecoder;
pub use error::{ExtractorError, PipelineError, PipelineStage};
pub use extractor::VocabularyExtractor;
pub use parser::{dedupe, parse_vocabulary_response, sanitize, strip_code_fence};
pub use pipeline::Pipeline;
pub use prompt::PromptBuilder;
pub use validate::{check_size, validate_filename, validate_path, DocumentKind, MAX_FILE_SIZE};
