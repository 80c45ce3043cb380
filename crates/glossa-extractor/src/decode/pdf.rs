//! PDF text extraction via lopdf

use super::TextUnit;
use lopdf::Document;
use std::path::Path;

/// Extract the text of every page, in page order
pub(crate) fn extract_pages(path: &Path) -> Result<Vec<TextUnit>, String> {
    let document = Document::load(path).map_err(|e| format!("failed to open PDF: {}", e))?;

    let pages = document
        .get_pages()
        .keys()
        .map(|&page| {
            document
                .extract_text(&[page])
                .map_err(|e| format!("page {}: {}", page, e))
        })
        .collect();

    Ok(pages)
}
