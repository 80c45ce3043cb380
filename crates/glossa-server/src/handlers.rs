//! HTTP request handlers for the vocabulary service.
//!
//! Every failure is rendered as `{"error": "..."}` with a status derived from
//! the error kind.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use glossa_domain::traits::CompletionProvider;
use glossa_domain::{ProcessingResult, VocabularyId, VocabularyItem};
use glossa_extractor::{ExtractorError, Pipeline, PipelineError, MAX_FILE_SIZE};
use glossa_llm::LlmError;
use glossa_store::SqliteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Largest accepted request body: the document ceiling plus multipart framing
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE as usize + 1024 * 1024;

/// AI backend as stored in the server state
pub type DynProvider = Box<dyn CompletionProvider<Error = LlmError> + Send + Sync>;

/// Pipeline type served over HTTP
pub type ServerPipeline = Pipeline<DynProvider, SqliteStore>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Pipeline and vocabulary access
    pub pipeline: Arc<ServerPipeline>,
}

impl AppState {
    /// Wrap a pipeline for sharing between handlers
    pub fn new(pipeline: ServerPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Stats response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Number of stored items
    pub total_vocabulary: usize,
}

/// Query parameters for listing vocabulary
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only return items with this language label
    pub language: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed request
    BadRequest(String),
    /// A document run failed
    Pipeline(PipelineError),
    /// A vocabulary operation failed
    Vocabulary(ExtractorError),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError::Pipeline(e)
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Vocabulary(e)
    }
}

/// Status code for an error kind
fn status_for(e: &ExtractorError) -> StatusCode {
    match e {
        ExtractorError::InvalidPath(_)
        | ExtractorError::NotFound(_)
        | ExtractorError::Oversized { .. }
        | ExtractorError::UnsupportedType(_)
        | ExtractorError::UnsafeFilename(_) => StatusCode::BAD_REQUEST,
        ExtractorError::DecodeFailed(_) | ExtractorError::NoTextContent => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ExtractorError::ExtractionFailed(_)
        | ExtractorError::ServiceError { .. }
        | ExtractorError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        ExtractorError::VocabularyNotFound(_) => StatusCode::NOT_FOUND,
        ExtractorError::Store(_) | ExtractorError::Io(_) | ExtractorError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Pipeline(e) => (status_for(&e.source), e.to_string()),
            AppError::Vocabulary(e) => (status_for(&e), e.to_string()),
        };

        if status.is_server_error() {
            error!("{} {}", status, message);
        } else {
            warn!("{} {}", status, message);
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

fn parse_id(raw: &str) -> Result<VocabularyId, AppError> {
    raw.parse()
        .map_err(|e| AppError::BadRequest(format!("Invalid ID: {}", e)))
}

/// GET /api/vocabulary - List vocabulary, newest first
async fn list_vocabulary(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<VocabularyItem>>, AppError> {
    let catalog = state.pipeline.catalog();
    let items = match query.language.as_deref().map(str::trim) {
        Some(language) if !language.is_empty() => catalog.vocabulary_by_language(language)?,
        _ => catalog.vocabulary_list()?,
    };
    Ok(Json(items))
}

/// GET /api/vocabulary/:id - Fetch one item
async fn get_vocabulary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VocabularyItem>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.pipeline.catalog().vocabulary(id)?))
}

/// DELETE /api/vocabulary/:id - Delete one item
async fn delete_vocabulary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    state.pipeline.catalog().delete_vocabulary(id)?;
    Ok(Json(MessageResponse {
        message: "Vocabulary deleted successfully".to_string(),
    }))
}

/// POST /api/upload - Process an uploaded document
///
/// Multipart form with a `file` field and an optional `language` field.
async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessingResult>, AppError> {
    let mut upload = None;
    let mut language = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to parse form: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                upload = Some((filename, bytes));
            }
            Some("language") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read language: {}", e)))?;
                language = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;
    let language = state
        .pipeline
        .language_or_default(language.as_deref())
        .to_string();

    let result = state
        .pipeline
        .process_upload(&filename, &bytes, &language)
        .await?;
    Ok(Json(result))
}

/// POST /api/export - Download all vocabulary as a JSON attachment
async fn export_vocabulary(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = state.pipeline.catalog().vocabulary_list()?;
    Ok((
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=vocabulary_export.json",
        )],
        Json(items),
    )
        .into_response())
}

/// GET /api/stats - Vocabulary counts
async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(StatsResponse {
        total_vocabulary: state.pipeline.catalog().vocabulary_count()?,
    }))
}

/// GET /health - Liveness check
async fn health_check() -> &'static str {
    "OK"
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/vocabulary", get(list_vocabulary))
        .route(
            "/api/vocabulary/:id",
            get(get_vocabulary).delete(delete_vocabulary),
        )
        .route("/api/upload", post(upload_document))
        .route("/api/export", post(export_vocabulary))
        .route("/api/stats", get(stats))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
