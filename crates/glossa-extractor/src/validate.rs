//! Input validation for documents on disk and uploaded filenames
//!
//! All checks are side-effect free. Path validation runs in this order:
//! blank path, missing file or directory, size ceiling, extension.

use crate::error::ExtractorError;
use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::Path;

/// Hard ceiling on document size (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
}

impl DocumentKind {
    /// Detect the kind from the final extension, case-insensitively
    ///
    /// Only the last extension counts, so `notes.pdf.bak` is not a PDF.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(OsStr::to_str)?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    /// Detect the kind from a bare filename
    pub fn from_filename(filename: &str) -> Option<Self> {
        Self::from_path(Path::new(filename))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => f.write_str("pdf"),
            DocumentKind::Docx => f.write_str("docx"),
        }
    }
}

/// Validate a document path and detect its kind
pub fn validate_path(path: &Path, max_size: u64) -> Result<DocumentKind, ExtractorError> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ExtractorError::InvalidPath(
            "file path cannot be empty".to_string(),
        ));
    }

    check_size(path, max_size)?;

    DocumentKind::from_path(path)
        .ok_or_else(|| ExtractorError::UnsupportedType(path.display().to_string()))
}

/// Check that `path` is an existing regular file no larger than `max_size`
///
/// Returns the file size in bytes.
pub fn check_size(path: &Path, max_size: u64) -> Result<u64, ExtractorError> {
    let metadata = fs::metadata(path)
        .map_err(|_| ExtractorError::NotFound(path.display().to_string()))?;

    if metadata.is_dir() {
        return Err(ExtractorError::NotFound(format!(
            "{} is a directory",
            path.display()
        )));
    }

    let size = metadata.len();
    if size > max_size {
        return Err(ExtractorError::Oversized {
            size,
            max: max_size,
        });
    }
    Ok(size)
}

/// Reject uploaded filenames that could escape the temp directory or
/// corrupt headers and logs
pub fn validate_filename(filename: &str) -> Result<(), ExtractorError> {
    let reason = if filename.contains("..") {
        "path traversal is not allowed"
    } else if filename.starts_with('/') || filename.starts_with('\\') {
        "absolute paths are not allowed"
    } else if filename.contains('\0') {
        "null bytes are not allowed"
    } else if filename.contains('\n') || filename.contains('\r') {
        "line breaks are not allowed"
    } else {
        return Ok(());
    };

    Err(ExtractorError::UnsafeFilename(format!(
        "{:?}: {}",
        filename, reason
    )))
}
