//! Vocabulary module - the stored unit of the Glossa system

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned surrogate key for a vocabulary item
///
/// Always positive once assigned by the store; never reused for a different
/// term while the item exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyId(i64);

impl VocabularyId {
    /// Create a VocabularyId from a raw row id
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw row id
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for VocabularyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VocabularyId {
    type Err = String;

    /// Parse a positive integer id
    ///
    /// # Examples
    ///
    /// ```
    /// use glossa_domain::VocabularyId;
    ///
    /// let id: VocabularyId = "42".parse().unwrap();
    /// assert_eq!(id.value(), 42);
    /// assert!("0".parse::<VocabularyId>().is_err());
    /// assert!("abc".parse::<VocabularyId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|e| format!("Invalid vocabulary id '{}': {}", s, e))?;
        if value <= 0 {
            return Err(format!("Invalid vocabulary id '{}': must be positive", s));
        }
        Ok(Self(value))
    }
}

/// A single stored vocabulary term
///
/// Items are created only by the persistence engine's insert path and removed
/// only by an explicit delete; they are never updated in place. The `text`
/// is unique across the whole store regardless of `language`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    /// Store-assigned identifier
    pub id: VocabularyId,

    /// The term or phrase, trimmed and non-empty
    pub text: String,

    /// Free-text label for the source language
    pub language: String,

    /// Insert time (seconds since Unix epoch)
    pub created_at: u64,
}
