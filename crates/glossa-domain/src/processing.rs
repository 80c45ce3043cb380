//! Per-run processing summary

use serde::{Deserialize, Serialize};

/// Summary of one pipeline run
///
/// Not persisted. The total is always derived from the two counts, so the
/// fields are private and only reachable through the constructor. A
/// deserialized `total_processed` is ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProcessingResultFields")]
pub struct ProcessingResult {
    new_vocabulary: usize,
    skipped_duplicates: usize,
    total_processed: usize,
    language: String,
    file_path: String,
}

#[derive(Deserialize)]
struct ProcessingResultFields {
    new_vocabulary: usize,
    skipped_duplicates: usize,
    language: String,
    file_path: String,
}

impl From<ProcessingResultFields> for ProcessingResult {
    fn from(fields: ProcessingResultFields) -> Self {
        Self::new(
            fields.new_vocabulary,
            fields.skipped_duplicates,
            fields.language,
            fields.file_path,
        )
    }
}

impl ProcessingResult {
    /// Assemble a result from commit counts
    ///
    /// # Examples
    ///
    /// ```
    /// use glossa_domain::ProcessingResult;
    ///
    /// let result = ProcessingResult::new(3, 2, "Spanish", "lesson1.pdf");
    /// assert_eq!(result.total_processed(), 5);
    /// ```
    pub fn new(
        new_vocabulary: usize,
        skipped_duplicates: usize,
        language: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            new_vocabulary,
            skipped_duplicates,
            total_processed: new_vocabulary + skipped_duplicates,
            language: language.into(),
            file_path: file_path.into(),
        }
    }

    /// Terms inserted during this run
    pub fn new_vocabulary(&self) -> usize {
        self.new_vocabulary
    }

    /// Terms already stored (or lost an insert race)
    pub fn skipped_duplicates(&self) -> usize {
        self.skipped_duplicates
    }

    /// `new_vocabulary + skipped_duplicates`
    pub fn total_processed(&self) -> usize {
        self.total_processed
    }

    /// Session language echoed back for display
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Source document path echoed back for display
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}
