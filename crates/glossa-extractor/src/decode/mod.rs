//! Document decoding
//!
//! Turns a validated PDF or DOCX file into plain text. Each format yields a
//! list of text units (pages or paragraphs); a unit that fails to decode is
//! logged and skipped, while a container that cannot be opened at all fails
//! the whole document.

mod docx;
mod pdf;

use crate::error::ExtractorError;
use crate::validate::{check_size, DocumentKind};
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of decoding one page or paragraph
pub(crate) type TextUnit = Result<String, String>;

/// Decodes supported documents into plain text
#[derive(Debug, Clone, Copy)]
pub struct DocumentDecoder {
    max_file_size: u64,
}

impl DocumentDecoder {
    /// Create a decoder enforcing the given size ceiling
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Decode the document at `path` into trimmed text
    pub fn decode(&self, path: &Path) -> Result<String, ExtractorError> {
        check_size(path, self.max_file_size)?;

        let kind = DocumentKind::from_path(path)
            .ok_or_else(|| ExtractorError::UnsupportedType(path.display().to_string()))?;

        let units = match kind {
            DocumentKind::Pdf => pdf::extract_pages(path),
            DocumentKind::Docx => docx::extract_paragraphs(path),
        }
        .map_err(ExtractorError::DecodeFailed)?;

        debug!("Decoded {} {} units from {}", units.len(), kind, path.display());
        join_units(units)
    }
}

fn join_units(units: Vec<TextUnit>) -> Result<String, ExtractorError> {
    let mut text = String::new();
    for (idx, unit) in units.into_iter().enumerate() {
        match unit {
            Ok(chunk) => {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&chunk);
            }
            Err(e) => warn!("Skipping unreadable unit {}: {}", idx + 1, e),
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractorError::NoTextContent);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MAX_FILE_SIZE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_join_skips_failed_units() {
        let units = vec![
            Ok("hola".to_string()),
            Err("bad page".to_string()),
            Ok("adiós".to_string()),
        ];
        assert_eq!(join_units(units).unwrap(), "hola\nadiós");
    }

    #[test]
    fn test_join_trims_but_keeps_inner_whitespace() {
        let units = vec![Ok("  buenos   días ".to_string()), Ok("gracias\n\n".to_string())];
        assert_eq!(join_units(units).unwrap(), "buenos   días \ngracias");
    }

    #[test]
    fn test_join_blank_is_no_text() {
        let units = vec![Ok("   ".to_string()), Err("x".to_string())];
        assert!(matches!(join_units(units), Err(ExtractorError::NoTextContent)));
        assert!(matches!(join_units(Vec::new()), Err(ExtractorError::NoTextContent)));
    }

    #[test]
    fn test_garbage_pdf_is_decode_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        let result = DocumentDecoder::new(MAX_FILE_SIZE).decode(&path);
        assert!(matches!(result, Err(ExtractorError::DecodeFailed(_))));
    }

    #[test]
    fn test_garbage_docx_is_decode_failed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.docx");
        fs::write(&path, b"PK but not really").unwrap();

        let result = DocumentDecoder::new(MAX_FILE_SIZE).decode(&path);
        assert!(matches!(result, Err(ExtractorError::DecodeFailed(_))));
    }

    #[test]
    fn test_decode_revalidates_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.docx");
        fs::write(&path, vec![0u8; 64]).unwrap();

        let result = DocumentDecoder::new(32).decode(&path);
        assert!(matches!(result, Err(ExtractorError::Oversized { size: 64, max: 32 })));
    }
}
