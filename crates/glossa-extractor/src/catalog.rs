//! Read, delete, and export access to stored vocabulary
//!
//! Needs no AI backend, so shells can browse the store without credentials.

use crate::error::ExtractorError;
use glossa_domain::traits::VocabularyStore;
use glossa_domain::{VocabularyId, VocabularyItem};
use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Vocabulary pass-throughs over a shared store
pub struct Catalog<S> {
    store: Arc<S>,
}

impl<S> Catalog<S>
where
    S: VocabularyStore,
    S::Error: Display,
{
    /// Wrap a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All stored vocabulary, newest first
    pub fn vocabulary_list(&self) -> Result<Vec<VocabularyItem>, ExtractorError> {
        self.store.list().map_err(store_error)
    }

    /// Stored vocabulary for one language label, newest first
    pub fn vocabulary_by_language(
        &self,
        language: &str,
    ) -> Result<Vec<VocabularyItem>, ExtractorError> {
        self.store.list_by_language(language).map_err(store_error)
    }

    /// A single vocabulary item
    pub fn vocabulary(&self, id: VocabularyId) -> Result<VocabularyItem, ExtractorError> {
        self.store
            .get(id)
            .map_err(store_error)?
            .ok_or(ExtractorError::VocabularyNotFound(id))
    }

    /// Delete a vocabulary item by id
    pub fn delete_vocabulary(&self, id: VocabularyId) -> Result<(), ExtractorError> {
        self.vocabulary(id)?;
        self.store.delete(id).map_err(store_error)?;
        info!("Deleted vocabulary {}", id);
        Ok(())
    }

    /// Number of stored vocabulary items
    pub fn vocabulary_count(&self) -> Result<usize, ExtractorError> {
        self.store.count().map_err(store_error)
    }

    /// Write all vocabulary to `path` as a pretty-printed JSON array
    ///
    /// On Unix a new file is created owner-read/write only. Returns the
    /// number of items written.
    pub fn export_vocabulary(&self, path: impl AsRef<Path>) -> Result<usize, ExtractorError> {
        let path = path.as_ref();
        let items = self.vocabulary_list()?;
        let json = serde_json::to_vec_pretty(&items)
            .map_err(|e| ExtractorError::Store(format!("Failed to serialize vocabulary: {}", e)))?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path)?;
        file.write_all(&json)?;

        info!("Exported {} items to {}", items.len(), path.display());
        Ok(items.len())
    }
}

fn store_error<E: Display>(e: E) -> ExtractorError {
    ExtractorError::Store(e.to_string())
}
