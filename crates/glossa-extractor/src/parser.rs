//! Parse AI output into vocabulary terms

use crate::error::ExtractorError;

/// Strip one surrounding Markdown code fence, with or without a `json` tag
///
/// Only a literal prefix and suffix are removed; nothing else is repaired.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    unfenced.strip_suffix("```").unwrap_or(unfenced).trim()
}

/// Parse the AI response as a JSON array of strings
pub fn parse_vocabulary_response(response: &str) -> Result<Vec<String>, ExtractorError> {
    let json = strip_code_fence(response);
    serde_json::from_str::<Vec<String>>(json).map_err(|e| {
        ExtractorError::MalformedResponse(format!("expected a JSON array of strings: {}", e))
    })
}

/// Trim every term and drop the ones left empty
pub fn sanitize(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Drop repeated terms, keeping the first occurrence
pub fn dedupe(terms: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(terms.len());
    terms
        .into_iter()
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
