//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{VocabularyId, VocabularyItem};

/// Trait for storing and retrieving vocabulary
///
/// Implemented by the infrastructure layer (glossa-store). Methods take
/// `&self` so a single handle can be shared between concurrent pipeline runs;
/// the implementation's uniqueness constraint on `text` is what serializes
/// racing inserts.
pub trait VocabularyStore {
    /// Error type for store operations
    type Error;

    /// Insert a new term; fails if the text is already stored
    fn insert(&self, text: &str, language: &str) -> Result<VocabularyId, Self::Error>;

    /// Check whether the exact text is stored (any language)
    fn exists_text(&self, text: &str) -> Result<bool, Self::Error>;

    /// Get an item by ID
    fn get(&self, id: VocabularyId) -> Result<Option<VocabularyItem>, Self::Error>;

    /// Get an item by its exact text
    fn get_by_text(&self, text: &str) -> Result<Option<VocabularyItem>, Self::Error>;

    /// List all items, newest first
    fn list(&self) -> Result<Vec<VocabularyItem>, Self::Error>;

    /// List items carrying the given language label, newest first
    fn list_by_language(&self, language: &str) -> Result<Vec<VocabularyItem>, Self::Error>;

    /// Delete an item by ID; fails if no such item exists
    fn delete(&self, id: VocabularyId) -> Result<(), Self::Error>;

    /// Total number of stored items
    fn count(&self) -> Result<usize, Self::Error>;
}

/// Trait for single-turn text completion
///
/// Implemented by the infrastructure layer (glossa-llm). Calls may block;
/// callers that need a deadline run them on a blocking task.
pub trait CompletionProvider {
    /// Error type for completion calls
    type Error;

    /// Send a prompt and return the raw model text
    fn complete(&self, prompt: &str) -> Result<String, Self::Error>;
}

impl<T: CompletionProvider + ?Sized> CompletionProvider for Box<T> {
    type Error = T::Error;

    fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).complete(prompt)
    }
}
