//! Error types for the extraction pipeline

use glossa_domain::VocabularyId;
use glossa_llm::LlmError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating, decoding, extracting, or storing
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Path is empty or blank
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path does not exist or is a directory
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds the size ceiling
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    Oversized {
        /// Actual size in bytes
        size: u64,
        /// Allowed ceiling in bytes
        max: u64,
    },

    /// Extension is not `.pdf` or `.docx`
    #[error("Unsupported file type: {0} (only .pdf and .docx are supported)")]
    UnsupportedType(String),

    /// Uploaded filename failed the safety check
    #[error("Unsafe filename: {0}")]
    UnsafeFilename(String),

    /// The document container could not be opened or parsed
    #[error("Failed to decode document: {0}")]
    DecodeFailed(String),

    /// The document decoded to no text (e.g. scanned pages)
    #[error("No text content found in document")]
    NoTextContent,

    /// The AI call timed out or never completed
    #[error("Vocabulary extraction failed: {0}")]
    ExtractionFailed(String),

    /// The AI service reported a failure
    #[error("AI service error ({status_code}): {message}")]
    ServiceError {
        /// Error message reported by the service
        message: String,
        /// HTTP status code
        status_code: u16,
        /// Request id, for support requests
        request_id: Option<String>,
        /// Raw response body, for debugging
        raw_body: Option<String>,
    },

    /// The AI reply was not a JSON array of strings, even after fence stripping
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// No vocabulary item with the given ID
    #[error("Vocabulary with ID {0} not found")]
    VocabularyNotFound(VocabularyId),

    /// Vocabulary store error
    #[error("Store error: {0}")]
    Store(String),

    /// Filesystem error (temp files, export)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether retrying the same request may succeed
    ///
    /// Only service-reported failures qualify: the model ran and erred.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractorError::ServiceError { .. })
    }
}

impl From<LlmError> for ExtractorError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Service {
                message,
                status_code,
                request_id,
                raw_body,
            } => ExtractorError::ServiceError {
                message,
                status_code,
                request_id,
                raw_body,
            },
            other => ExtractorError::ExtractionFailed(other.to_string()),
        }
    }
}

/// Pipeline stage in which a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Path, filename, extension, and size checks
    Validate,
    /// Writing an uploaded document to its temp file
    Upload,
    /// Document decoding
    Decode,
    /// AI extraction
    Extract,
    /// Deduplication and persistence
    Commit,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Validate => "validate",
            PipelineStage::Upload => "upload",
            PipelineStage::Decode => "decode",
            PipelineStage::Extract => "extract",
            PipelineStage::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// A pipeline failure tagged with the stage that produced it
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    /// Stage that failed
    pub stage: PipelineStage,
    /// Underlying cause
    #[source]
    pub source: ExtractorError,
}

impl PipelineError {
    pub(crate) fn at(stage: PipelineStage) -> impl FnOnce(ExtractorError) -> Self {
        move |source| Self { stage, source }
    }

    /// Whether retrying the run may succeed
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
