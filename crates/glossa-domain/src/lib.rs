//! Glossa Domain Layer
//!
//! Core types and trait interfaces for the Glossa vocabulary pipeline. Everything
//! else in the workspace depends on this crate; it depends on nothing but serde.
//!
//! ## Key Concepts
//!
//! - **Vocabulary item**: a stored term, globally unique by its text
//! - **Processing result**: the per-run summary of new vs. skipped terms
//! - **Store**: insert-if-absent persistence keyed on term text
//! - **Completion provider**: the single-turn AI capability used for extraction
//!
//! ## Architecture
//!
//! Infrastructure implementations (SQLite, HTTP AI backends) live in other
//! crates and plug in through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod processing;
pub mod traits;
pub mod vocabulary;

// Re-exports for convenience
pub use processing::ProcessingResult;
pub use vocabulary::{VocabularyId, VocabularyItem};
