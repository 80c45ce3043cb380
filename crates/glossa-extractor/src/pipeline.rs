//! Pipeline orchestration
//!
//! One run is `validate → decode → extract → commit → summarize`. A failure
//! in any stage aborts the run with a [`PipelineError`] naming that stage;
//! there are no partial results. Terms committed before an abort stay stored.

use crate::catalog::Catalog;
use crate::commit::{commit, CommitSummary};
use crate::config::ExtractorConfig;
use crate::decode::DocumentDecoder;
use crate::error::{ExtractorError, PipelineError, PipelineStage};
use crate::extractor::VocabularyExtractor;
use crate::validate::{validate_filename, validate_path, DocumentKind};
use glossa_domain::traits::{CompletionProvider, VocabularyStore};
use glossa_domain::ProcessingResult;
use glossa_llm::LlmError;
use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runs documents through the pipeline and exposes the vocabulary store
pub struct Pipeline<L, S> {
    extractor: VocabularyExtractor<L>,
    store: Arc<S>,
    catalog: Catalog<S>,
    decoder: DocumentDecoder,
    config: ExtractorConfig,
}

impl<L, S> Pipeline<L, S>
where
    L: CompletionProvider<Error = LlmError> + Send + Sync + 'static,
    S: VocabularyStore + Send + Sync + 'static,
    S::Error: Display,
{
    /// Create a pipeline over a shared store
    pub fn new(
        provider: L,
        store: Arc<S>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            extractor: VocabularyExtractor::new(provider, config.extraction_timeout()),
            catalog: Catalog::new(Arc::clone(&store)),
            store,
            decoder: DocumentDecoder::new(config.max_file_size_bytes),
            config,
        })
    }

    /// Read, delete, and export access to the shared store
    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Configuration in effect
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Resolve a possibly blank language to the configured default
    pub fn language_or_default<'a>(&'a self, language: Option<&'a str>) -> &'a str {
        match language.map(str::trim) {
            Some(lang) if !lang.is_empty() => lang,
            _ => &self.config.default_language,
        }
    }

    /// Process the document at `path`, labelling new terms with `language`
    pub async fn process(
        &self,
        path: impl AsRef<Path>,
        language: &str,
    ) -> Result<ProcessingResult, PipelineError> {
        let path = path.as_ref();
        self.run(path, language, &path.display().to_string()).await
    }

    /// Process an uploaded document held in memory
    ///
    /// The bytes are written to a temp file that is removed on every exit
    /// path. The result reports the uploaded filename, not the temp path.
    pub async fn process_upload(
        &self,
        filename: &str,
        bytes: &[u8],
        language: &str,
    ) -> Result<ProcessingResult, PipelineError> {
        validate_filename(filename).map_err(PipelineError::at(PipelineStage::Validate))?;

        if DocumentKind::from_filename(filename).is_none() {
            return Err(PipelineError::at(PipelineStage::Validate)(
                ExtractorError::UnsupportedType(filename.to_string()),
            ));
        }

        let size = bytes.len() as u64;
        if size > self.config.max_file_size_bytes {
            return Err(PipelineError::at(PipelineStage::Validate)(
                ExtractorError::Oversized {
                    size,
                    max: self.config.max_file_size_bytes,
                },
            ));
        }

        let upload =
            write_temp(filename, bytes).map_err(PipelineError::at(PipelineStage::Upload))?;
        debug!("Staged upload {} at {}", filename, upload.path().display());

        // `upload` is dropped, and the file deleted, when this returns
        self.run(upload.path(), language, filename).await
    }

    async fn run(
        &self,
        path: &Path,
        language: &str,
        source: &str,
    ) -> Result<ProcessingResult, PipelineError> {
        info!("Processing {} (language: {})", source, language);

        validate_path(path, self.config.max_file_size_bytes)
            .map_err(PipelineError::at(PipelineStage::Validate))?;

        let text = self
            .decode(path.to_path_buf())
            .await
            .map_err(PipelineError::at(PipelineStage::Decode))?;
        debug!("Decoded {} chars from {}", text.len(), source);

        let terms = self
            .extractor
            .extract(&text, language)
            .await
            .map_err(PipelineError::at(PipelineStage::Extract))?;

        let summary = self
            .commit_terms(terms, language.to_string())
            .await
            .map_err(PipelineError::at(PipelineStage::Commit))?;

        info!(
            "Processed {}: {} new, {} skipped",
            source, summary.new_count, summary.skipped_count
        );

        Ok(ProcessingResult::new(
            summary.new_count,
            summary.skipped_count,
            language,
            source,
        ))
    }

    async fn decode(&self, path: PathBuf) -> Result<String, ExtractorError> {
        let decoder = self.decoder;
        tokio::task::spawn_blocking(move || decoder.decode(&path))
            .await
            .map_err(|e| ExtractorError::DecodeFailed(format!("Task join error: {}", e)))?
    }

    async fn commit_terms(
        &self,
        terms: Vec<String>,
        language: String,
    ) -> Result<CommitSummary, ExtractorError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || commit(store.as_ref(), &terms, &language))
            .await
            .map_err(|e| ExtractorError::Store(format!("Task join error: {}", e)))
    }
}

fn write_temp(filename: &str, bytes: &[u8]) -> Result<tempfile::NamedTempFile, ExtractorError> {
    // Only the last component, so separators cannot redirect the temp path
    let base = Path::new(filename)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    let mut file = tempfile::Builder::new()
        .prefix("glossa-")
        .suffix(&format!("-{}", base))
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_llm::MockProvider;
    use glossa_store::SqliteStore;

    type TestPipeline = Pipeline<MockProvider, SqliteStore>;

    fn pipeline(provider: MockProvider) -> (TestPipeline, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        let pipeline =
            Pipeline::new(provider, Arc::clone(&store), ExtractorConfig::default()).unwrap();
        (pipeline, store)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        let config = ExtractorConfig {
            extraction_timeout_secs: 0,
            ..ExtractorConfig::default()
        };
        let result = Pipeline::new(MockProvider::default(), store, config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_language_or_default() {
        let (pipeline, _) = pipeline(MockProvider::default());
        assert_eq!(pipeline.language_or_default(Some("Spanish")), "Spanish");
        assert_eq!(pipeline.language_or_default(Some("  ")), "auto-detect");
        assert_eq!(pipeline.language_or_default(None), "auto-detect");
    }

    #[tokio::test]
    async fn test_missing_file_fails_in_validate_stage() {
        let (pipeline, _) = pipeline(MockProvider::default());
        let err = pipeline.process("/nonexistent/notes.pdf", "Spanish").await.unwrap_err();
        assert_eq!(err.stage, PipelineStage::Validate);
        assert!(matches!(err.source, ExtractorError::NotFound(_)));
        assert!(err.to_string().starts_with("validate stage failed"));
    }

    #[tokio::test]
    async fn test_unsafe_upload_rejected_before_extension_check() {
        let (pipeline, _) = pipeline(MockProvider::default());
        let err = pipeline
            .process_upload("../notes.txt", b"data", "Spanish")
            .await
            .unwrap_err();
        assert!(matches!(err.source, ExtractorError::UnsafeFilename(_)));
    }

    #[tokio::test]
    async fn test_upload_unsupported_type() {
        let (pipeline, _) = pipeline(MockProvider::default());
        let err = pipeline
            .process_upload("notes.txt", b"hola", "Spanish")
            .await
            .unwrap_err();
        assert_eq!(err.stage, PipelineStage::Validate);
        assert!(matches!(err.source, ExtractorError::UnsupportedType(_)));
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_write() {
        let store = Arc::new(SqliteStore::new(":memory:").unwrap());
        let config = ExtractorConfig {
            max_file_size_bytes: 8,
            ..ExtractorConfig::default()
        };
        let pipeline = Pipeline::new(MockProvider::default(), store, config).unwrap();

        let err = pipeline
            .process_upload("notes.pdf", &[0u8; 9], "Spanish")
            .await
            .unwrap_err();
        assert!(matches!(err.source, ExtractorError::Oversized { size: 9, max: 8 }));
    }

    #[tokio::test]
    async fn test_failed_upload_removes_temp_file() {
        let (pipeline, _) = pipeline(MockProvider::default());
        let filename = "cleanup-check-7f3a.pdf";

        let err = pipeline
            .process_upload(filename, b"not a real pdf", "Spanish")
            .await
            .unwrap_err();
        assert_eq!(err.stage, PipelineStage::Decode);

        let leftovers = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(filename))
            .count();
        assert_eq!(leftovers, 0);
    }
}
