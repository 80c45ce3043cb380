//! Anthropic Messages API provider
//!
//! Production backend for vocabulary extraction. Sends a single user turn and
//! concatenates the text blocks of the reply.
//!
//! # Examples
//!
//! ```no_run
//! use glossa_llm::{AnthropicProvider, LlmConfig};
//! use glossa_domain::traits::CompletionProvider;
//!
//! let provider = AnthropicProvider::new(LlmConfig::with_api_key("sk-ant-...")).unwrap();
//! let reply = provider.complete("Say hola").unwrap();
//! ```

use crate::LlmError;
use glossa_domain::traits::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Messages API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// Default model used for extraction
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Default per-request timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default reply budget
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

const API_VERSION: &str = "2023-06-01";

/// Connection settings for the Anthropic backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key sent as `x-api-key`
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens in the reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Base URL of the API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl LlmConfig {
    /// Default settings with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    config: LlmConfig,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AnthropicProvider {
    /// Create a provider, rejecting a blank API key
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key cannot be empty".to_string()));
        }
        if config.timeout_secs == 0 {
            return Err(LlmError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Model this provider sends requests to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.endpoint.trim_end_matches('/'))
    }
}

impl CompletionProvider for AnthropicProvider {
    type Error = LlmError;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        // The blocking client owns a private runtime; build and drop it on
        // the calling (blocking) thread.
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build client: {}", e)))?;

        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = client
            .post(self.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .map_err(|e| transport_error(e, self.config.timeout()))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get("request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let raw = response
            .text()
            .map_err(|e| transport_error(e, self.config.timeout()))?;

        debug!(
            "Messages API answered {} ({} bytes)",
            status.as_u16(),
            raw.len()
        );

        if !status.is_success() {
            return Err(service_error(status, request_id, raw));
        }

        let parsed: MessagesResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(collect_text(parsed))
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(timeout)
    } else {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

fn service_error(
    status: reqwest::StatusCode,
    request_id: Option<String>,
    raw: String,
) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(&raw)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

    LlmError::Service {
        message,
        status_code: status.as_u16(),
        request_id,
        raw_body: if raw.is_empty() { None } else { Some(raw) },
    }
}

fn collect_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect()
}
