//! DOCX text extraction
//!
//! A DOCX file is a zip archive; the body lives in `word/document.xml`.
//! Each `w:p` element becomes one text unit built from its `w:t` runs.

use super::TextUnit;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract the text of every paragraph, in document order
pub(crate) fn extract_paragraphs(path: &Path) -> Result<Vec<TextUnit>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open DOCX: {}", e))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| format!("failed to open DOCX archive: {}", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {}: {}", DOCUMENT_PART, e))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("failed to read {}: {}", DOCUMENT_PART, e))?;

    parse_document_xml(&xml)
}

/// Text and first unescape failure of one open `w:p`
#[derive(Default)]
struct Paragraph {
    text: String,
    broken: Option<String>,
}

// Paragraphs nest inside text boxes (`w:txbxContent`), so open ones are kept
// on a stack. A nested paragraph is emitted before its enclosing one.
fn parse_document_xml(xml: &str) -> Result<Vec<TextUnit>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<Paragraph> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => open.push(Paragraph::default()),
                _ => {}
            },
            Ok(Event::Empty(e)) => match (e.name().as_ref(), open.last_mut()) {
                (b"w:tab", Some(p)) => p.text.push('\t'),
                (b"w:br" | b"w:cr", Some(p)) => p.text.push('\n'),
                (b"w:p", _) => paragraphs.push(Ok(String::new())),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                if let Some(p) = open.last_mut() {
                    match t.unescape() {
                        Ok(text) => p.text.push_str(&text),
                        Err(e) => {
                            p.broken.get_or_insert_with(|| e.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(p) = open.pop() {
                        paragraphs.push(match p.broken {
                            Some(e) => Err(e),
                            None => Ok(p.text),
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "malformed {} at byte {}: {}",
                    DOCUMENT_PART,
                    reader.buffer_position(),
                    e
                ))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn body(paragraphs: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            paragraphs
        )
    }

    #[test]
    fn test_paragraphs_join_runs() {
        let xml = body(
            "<w:p><w:r><w:t>Buenos</w:t></w:r><w:r><w:t xml:space=\"preserve\"> días</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Gracias &amp; adiós</w:t></w:r></w:p>",
        );
        let units = parse_document_xml(&xml).unwrap();
        let texts: Vec<_> = units.into_iter().map(Result::unwrap).collect();
        assert_eq!(texts, vec!["Buenos días", "Gracias & adiós"]);
    }

    #[test]
    fn test_empty_paragraph_and_tabs() {
        let xml = body("<w:p/><w:p><w:r><w:t>uno</w:t><w:tab/><w:t>dos</w:t></w:r></w:p>");
        let texts: Vec<_> = parse_document_xml(&xml)
            .unwrap()
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(texts, vec!["", "uno\tdos"]);
    }

    #[test]
    fn test_text_outside_runs_is_ignored() {
        let xml = body("<w:p><w:r><w:instrText>PAGE</w:instrText><w:t>hola</w:t></w:r></w:p>");
        let units = parse_document_xml(&xml).unwrap();
        assert_eq!(units, vec![Ok("hola".to_string())]);
    }

    #[test]
    fn test_text_box_keeps_enclosing_paragraph() {
        let xml = body(
            "<w:p><w:r><w:t>antes</w:t></w:r>\
             <w:r><w:pict><w:txbxContent><w:p><w:r><w:t>caja</w:t></w:r></w:p></w:txbxContent></w:pict></w:r>\
             <w:r><w:t xml:space=\"preserve\"> despues</w:t></w:r></w:p>",
        );
        let units = parse_document_xml(&xml).unwrap();
        assert_eq!(
            units,
            vec![Ok("caja".to_string()), Ok("antes despues".to_string())]
        );
    }

    #[test]
    fn test_reads_document_part_from_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.docx");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(body("<w:p><w:r><w:t>Bom dia</w:t></w:r></w:p>").as_bytes())
            .unwrap();
        writer.finish().unwrap();

        let units = extract_paragraphs(&path).unwrap();
        assert_eq!(units, vec![Ok("Bom dia".to_string())]);
    }

    #[test]
    fn test_archive_without_document_part_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("other.docx");
        let mut writer = ZipWriter::new(File::create(&path).unwrap());
        writer
            .start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hi").unwrap();
        writer.finish().unwrap();

        assert!(extract_paragraphs(&path).is_err());
    }
}
