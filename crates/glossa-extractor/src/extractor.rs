//! Vocabulary extraction client

use crate::error::ExtractorError;
use crate::parser::{dedupe, parse_vocabulary_response, sanitize};
use crate::prompt::PromptBuilder;
use glossa_domain::traits::CompletionProvider;
use glossa_llm::LlmError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Turns document text into a clean, deduplicated list of terms
pub struct VocabularyExtractor<L> {
    provider: Arc<L>,
    timeout: Duration,
}

impl<L> VocabularyExtractor<L>
where
    L: CompletionProvider<Error = LlmError> + Send + Sync + 'static,
{
    /// Create an extractor that gives each AI call at most `timeout`
    pub fn new(provider: L, timeout: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            timeout,
        }
    }

    /// Extract vocabulary terms from `text`
    ///
    /// Blank text yields an empty list without calling the AI. An empty list
    /// is also a valid answer from the AI.
    pub async fn extract(&self, text: &str, language: &str) -> Result<Vec<String>, ExtractorError> {
        if text.trim().is_empty() {
            debug!("Blank text, skipping AI call");
            return Ok(Vec::new());
        }

        let prompt = PromptBuilder::new(text, language).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(self.timeout, self.call_provider(prompt))
            .await
            .map_err(|_| {
                ExtractorError::ExtractionFailed(format!(
                    "AI call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })??;

        debug!("AI response length: {} chars", response.len());

        let candidates = parse_vocabulary_response(&response)?;
        let terms = dedupe(sanitize(candidates));

        info!("Extracted {} vocabulary terms", terms.len());
        Ok(terms)
    }

    async fn call_provider(&self, prompt: String) -> Result<String, ExtractorError> {
        let provider = Arc::clone(&self.provider);

        // The provider API is synchronous
        tokio::task::spawn_blocking(move || provider.complete(&prompt))
            .await
            .map_err(|e| ExtractorError::ExtractionFailed(format!("Task join error: {}", e)))?
            .map_err(ExtractorError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_llm::MockProvider;
    use std::time::Instant;

    fn extractor(provider: MockProvider) -> VocabularyExtractor<MockProvider> {
        VocabularyExtractor::new(provider, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_blank_text_skips_ai() {
        let provider = MockProvider::new(r#"["never"]"#);
        let counter = provider.clone();

        let terms = extractor(provider).extract(" \n\t ", "Spanish").await.unwrap();
        assert!(terms.is_empty());
        assert_eq!(counter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extract_sanitizes_and_dedupes() {
        let provider = MockProvider::new(r#"["hola","  hola  ","adiós",""]"#);
        let terms = extractor(provider).extract("Hola. Adiós.", "Spanish").await.unwrap();
        assert_eq!(terms, vec!["hola", "adiós"]);
    }

    #[tokio::test]
    async fn test_extract_sends_language_in_prompt() {
        let provider = MockProvider::new("[]");
        let observer = provider.clone();

        extractor(provider).extract("Merci", "French").await.unwrap();
        let prompt = observer.last_prompt().unwrap();
        assert!(prompt.contains("French"));
        assert!(prompt.ends_with("Merci"));
    }

    #[tokio::test]
    async fn test_fenced_response_is_accepted() {
        let provider = MockProvider::new("```json\n[\"a\",\"b\"]\n```");
        let terms = extractor(provider).extract("a b", "").await.unwrap();
        assert_eq!(terms, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let provider = MockProvider::new("I could not find any vocabulary.");
        let result = extractor(provider).extract("texto", "Spanish").await;
        assert!(matches!(result, Err(ExtractorError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_service_failure_is_service_error() {
        let provider = MockProvider::failing(LlmError::Service {
            message: "overloaded".to_string(),
            status_code: 529,
            request_id: Some("req_1".to_string()),
            raw_body: None,
        });
        let result = extractor(provider).extract("texto", "Spanish").await;
        assert!(matches!(
            result,
            Err(ExtractorError::ServiceError { status_code: 529, .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_extraction_failed() {
        let provider = MockProvider::failing(LlmError::Communication("dns".to_string()));
        let result = extractor(provider).extract("texto", "Spanish").await;
        assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
    }

    #[tokio::test]
    async fn test_slow_ai_times_out() {
        let provider = MockProvider::new(r#"["tarde"]"#).with_delay(Duration::from_secs(3));
        let extractor = VocabularyExtractor::new(provider, Duration::from_secs(1));

        let started = Instant::now();
        let result = extractor.extract("texto", "Spanish").await;

        assert!(matches!(
            result,
            Err(ExtractorError::ExtractionFailed(ref m)) if m.contains("timed out")
        ));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
