//! Deduplication and persistence of extracted terms

use glossa_domain::traits::VocabularyStore;
use std::fmt::Display;
use tracing::{debug, warn};

/// Outcome of committing one batch of terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Terms stored by this batch
    pub new_count: usize,
    /// Terms already present, or whose insert failed
    pub skipped_count: usize,
}

/// Store every term not already present, in order
///
/// Existence is checked globally, not per language. Any insert failure,
/// including losing a uniqueness race to a concurrent run, counts as a skip,
/// so `new_count + skipped_count == terms.len()` always holds.
pub fn commit<S>(store: &S, terms: &[String], language: &str) -> CommitSummary
where
    S: VocabularyStore,
    S::Error: Display,
{
    let mut summary = CommitSummary::default();

    for term in terms {
        match store.exists_text(term) {
            Ok(true) => {
                debug!("Skipping existing term '{}'", term);
                summary.skipped_count += 1;
                continue;
            }
            Ok(false) => {}
            // The UNIQUE constraint still guards the insert
            Err(e) => warn!("Existence check failed for '{}': {}", term, e),
        }

        match store.insert(term, language) {
            Ok(_) => summary.new_count += 1,
            Err(e) => {
                warn!("Failed to insert '{}': {}", term, e);
                summary.skipped_count += 1;
            }
        }
    }

    summary
}
