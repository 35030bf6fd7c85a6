use crate::error::ExtractionError;
use crate::extractor::r#trait::TextExtractor;
use crate::models::Format;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Path of the main document part inside a DOCX container
const DOCUMENT_PART: &str = "word/document.xml";

/// Word (.docx) text extractor.
///
/// A DOCX file is a ZIP archive; the body lives in `word/document.xml`.
/// Every `<w:p>` becomes one line of output, made of its `<w:t>` runs,
/// with `<w:tab/>` as a tab and `<w:br/>`/`<w:cr/>` as a newline.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(content: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(content))
            .map_err(|e| ExtractionError::Container(e.to_string()))?;

        let mut part = match archive.by_name(DOCUMENT_PART) {
            Ok(part) => part,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ExtractionError::MissingDocumentPart)
            }
            Err(e) => return Err(ExtractionError::Container(e.to_string())),
        };

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| ExtractionError::Container(format!("failed to read {}: {}", DOCUMENT_PART, e)))?;
        Ok(xml)
    }

    /// Collect paragraph texts from document XML, in document order
    fn paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();

        let mut paragraphs = Vec::new();
        // Text boxes nest whole paragraphs inside a run, hence a stack
        let mut open: Vec<OpenParagraph> = Vec::new();
        let mut run_depth = 0usize;
        let mut in_text = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"p" => open.push(OpenParagraph::default()),
                    b"r" => run_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                    b"p" => {
                        if let Some(paragraph) = open.pop() {
                            let finished = paragraph.into_lines();
                            match open.last_mut() {
                                // Nested paragraphs follow their parent's own text
                                Some(parent) => parent.nested.extend(finished),
                                None => paragraphs.extend(finished),
                            }
                        }
                    }
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                    b"p" => match open.last_mut() {
                        Some(parent) => parent.nested.push(String::new()),
                        None => paragraphs.push(String::new()),
                    },
                    // <w:tab/> also defines tab stops inside <w:pPr>; only runs count
                    b"tab" if run_depth > 0 => {
                        if let Some(current) = open.last_mut() {
                            current.text.push('\t');
                        }
                    }
                    b"br" | b"cr" if run_depth > 0 => {
                        if let Some(current) = open.last_mut() {
                            current.text.push('\n');
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) if in_text => {
                    let text = e
                        .unescape()
                        .map_err(|err| ExtractionError::Xml(err.to_string()))?;
                    if let Some(current) = open.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractionError::Xml(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(paragraphs)
    }
}

/// A `<w:p>` still being read, with any paragraphs nested inside it
#[derive(Default)]
struct OpenParagraph {
    text: String,
    nested: Vec<String>,
}

impl OpenParagraph {
    fn into_lines(self) -> Vec<String> {
        let mut lines = Vec::with_capacity(1 + self.nested.len());
        lines.push(self.text);
        lines.extend(self.nested);
        lines
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError> {
        let xml = Self::read_document_part(content)?;
        let paragraphs = Self::paragraphs(&xml)?;
        debug!("extracted {} DOCX paragraphs", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }

    fn format(&self) -> Format {
        Format::Docx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::fixtures::{docx_with_body, docx_with_paragraphs};
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_docx_extractor_supports_docx() {
        let extractor = DocxExtractor::new();
        assert!(extractor.supports_extension("docx"));
        assert!(extractor.supports_extension("DOCX"));
        assert!(!extractor.supports_extension("pdf"));
    }

    #[test]
    fn test_docx_paragraphs_joined_with_newline() {
        let docx = docx_with_paragraphs(&["Wimbledon final", "Federer against Nadal", "Five sets"]);
        let text = DocxExtractor::new().extract(&docx).unwrap();
        assert_eq!(text, "Wimbledon final\nFederer against Nadal\nFive sets");
    }

    #[test]
    fn test_docx_runs_tabs_and_breaks() {
        let body = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t xml:space="preserve">Slam </w:t></w:r><w:r><w:t>dunk</w:t><w:tab/><w:t>by LeBron</w:t><w:br/><w:t>&amp; Curry</w:t></w:r></w:p>"#;
        let docx = docx_with_body(body);
        let text = DocxExtractor::new().extract(&docx).unwrap();
        assert_eq!(text, "Slam dunk\tby LeBron\n& Curry");
    }

    #[test]
    fn test_docx_empty_paragraphs_are_kept() {
        let body = "<w:p><w:r><w:t>puck</w:t></w:r></w:p><w:p/><w:p></w:p><w:p><w:r><w:t>rink</w:t></w:r></w:p>";
        let docx = docx_with_body(body);
        let text = DocxExtractor::new().extract(&docx).unwrap();
        assert_eq!(text, "puck\n\n\nrink");
    }

    #[test]
    fn test_docx_text_box_follows_enclosing_paragraph() {
        let body = "<w:p><w:r><w:t>Before box</w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>In box</w:t></w:r></w:p><w:p/></w:txbxContent></w:pict></w:r><w:r><w:t> after box</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>";
        let text = DocxExtractor::new().extract(&docx_with_body(body)).unwrap();
        assert_eq!(text, "Before box after box\nIn box\n\nNext");
    }

    #[test]
    fn test_docx_ignores_deleted_text() {
        let body = "<w:p><w:r><w:t>bat</w:t></w:r><w:del><w:r><w:delText>ball</w:delText></w:r></w:del></w:p>";
        let text = DocxExtractor::new().extract(&docx_with_body(body)).unwrap();
        assert_eq!(text, "bat");
    }

    #[test]
    fn test_docx_not_a_zip_fails() {
        let result = DocxExtractor::new().extract(b"plain text pretending to be docx");
        assert!(matches!(result, Err(ExtractionError::Container(_))));
    }

    #[test]
    fn test_docx_without_document_part_fails() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("readme.txt", FileOptions::default()).unwrap();
        zip.write_all(b"Hello from ZIP!").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let result = DocxExtractor::new().extract(&bytes);
        assert!(matches!(result, Err(ExtractionError::MissingDocumentPart)));
    }

    #[test]
    fn test_docx_malformed_xml_fails() {
        let docx = docx_with_body("<w:p><w:r><w:t>goal</w:r></w:p>");
        let result = DocxExtractor::new().extract(&docx);
        assert!(matches!(result, Err(ExtractionError::Xml(_))));
    }
}
