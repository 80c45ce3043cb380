//! Glossa LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `glossa-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic double for testing
//! - `AnthropicProvider`: Messages API backend used in production
//!
//! # Examples
//!
//! ```
//! use glossa_llm::MockProvider;
//! use glossa_domain::traits::CompletionProvider;
//!
//! let provider = MockProvider::new(r#"["hola"]"#);
//! let result = provider.complete("test prompt").unwrap();
//! assert_eq!(result, r#"["hola"]"#);
//! ```

#![warn(missing_docs)]

pub mod anthropic;

use glossa_domain::traits::CompletionProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use anthropic::{AnthropicProvider, LlmConfig};

/// Errors that can occur during completion calls
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// The request never completed (connection, DNS, TLS, body read)
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request exceeded its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a failure status
    ///
    /// `raw_body` is kept for diagnostics but deliberately left out of the
    /// display text.
    #[error("AI service error ({status_code}): {message}{}", request_id_suffix(.request_id))]
    Service {
        /// Error message reported by the service
        message: String,
        /// HTTP status code
        status_code: u16,
        /// Request id header, when the service sent one
        request_id: Option<String>,
        /// Raw response body
        raw_body: Option<String>,
    },

    /// The service answered successfully but the envelope was unreadable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider was misconfigured
    #[error("Configuration error: {0}")]
    Config(String),
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (request-id: {})", id),
        None => String::new(),
    }
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Clones share
/// their response tables and call counter.
///
/// # Examples
///
/// ```
/// use glossa_llm::{LlmError, MockProvider};
/// use glossa_domain::traits::CompletionProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", r#"["uno"]"#);
/// provider.add_error("prompt2", LlmError::Communication("down".into()));
///
/// assert_eq!(provider.complete("prompt1").unwrap(), r#"["uno"]"#);
/// assert!(provider.complete("prompt2").is_err());
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Result<String, LlmError>,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a MockProvider that fails every prompt with the given error
    pub fn failing(error: LlmError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_response: Result<String, LlmError>) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Sleep this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        lock(&self.responses).insert(prompt.into(), Err(error));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.last_prompt).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_prompt) = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        lock(&self.responses)
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone())
    }
}

// A poisoned table only means another test thread panicked mid-call.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
