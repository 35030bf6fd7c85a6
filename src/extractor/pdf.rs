use crate::error::ExtractionError;
use crate::extractor::r#trait::TextExtractor;
use crate::models::Format;
use log::{debug, warn};
use lopdf::Document;

/// PDF text extractor.
///
/// Pages are decoded one at a time with lopdf and their text is concatenated
/// in page order. A page that yields nothing contributes an empty string.
/// If no page yields any text at all, pdf-extract is run over the whole
/// buffer instead.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_with_pdf_extract(content: &[u8]) -> String {
        // pdf-extract panics on some malformed font programs
        match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content)) {
            Ok(Ok(text)) => text.trim().to_string(),
            Ok(Err(e)) => {
                debug!("pdf-extract fallback failed: {}", e);
                String::new()
            }
            Err(_) => {
                warn!("pdf-extract fallback panicked, treating document as textless");
                String::new()
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(content).map_err(|e| ExtractionError::Pdf(e.to_string()))?;

        let pages = doc.get_pages();
        let mut text_content = String::new();

        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                // lopdf closes every text object with a newline; pages are joined without one
                Ok(page_text) => text_content.push_str(page_text.trim_end_matches('\n')),
                Err(e) => debug!("page {} has no extractable text: {}", page_num, e),
            }
        }
        debug!("extracted {} chars from {} PDF pages", text_content.len(), pages.len());

        if text_content.trim().is_empty() && !pages.is_empty() {
            return Ok(Self::extract_with_pdf_extract(content));
        }

        Ok(text_content)
    }

    fn format(&self) -> Format {
        Format::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::fixtures::pdf_with_pages;

    #[test]
    fn test_pdf_extractor_supports_pdf() {
        let extractor = PdfExtractor::new();
        assert!(extractor.supports_extension("pdf"));
        assert!(extractor.supports_extension("PDF"));
        assert!(!extractor.supports_extension("docx"));
    }

    #[test]
    fn test_pdf_pages_joined_in_order() {
        let pdf = pdf_with_pages(&["Messi scored", " a great goal", " in the FIFA match"]);
        let text = PdfExtractor::new().extract(&pdf).unwrap();
        assert_eq!(text, "Messi scored a great goal in the FIFA match");
    }

    #[test]
    fn test_pdf_empty_page_contributes_nothing() {
        let pdf = pdf_with_pages(&["first", "", "third"]);
        let text = PdfExtractor::new().extract(&pdf).unwrap();
        assert_eq!(text, "firstthird");
    }

    #[test]
    fn test_pdf_without_any_text_is_not_an_error() {
        let pdf = pdf_with_pages(&[""]);
        let text = PdfExtractor::new().extract(&pdf).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_pdf_garbage_bytes_fail() {
        let result = PdfExtractor::new().extract(b"definitely not a pdf");
        assert!(matches!(result, Err(ExtractionError::Pdf(_))));
    }
}
