pub mod docx;
pub mod pdf;
pub mod r#trait;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use r#trait::TextExtractor;

use crate::error::ExtractionError;
use crate::models::Format;

/// Extract plain text from a document of the given format
pub fn extract(content: &[u8], format: Format) -> Result<String, ExtractionError> {
    match format {
        Format::Pdf => PdfExtractor::new().extract(content),
        Format::Docx => DocxExtractor::new().extract(content),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{docx_with_paragraphs, pdf_with_pages};
    use super::*;

    #[test]
    fn test_extract_dispatches_on_format() {
        let pdf = pdf_with_pages(&["hockey"]);
        let docx = docx_with_paragraphs(&["cricket"]);
        assert_eq!(extract(&pdf, Format::Pdf).unwrap(), "hockey");
        assert_eq!(extract(&docx, Format::Docx).unwrap(), "cricket");
    }

    #[test]
    fn test_extract_with_wrong_declared_format_fails() {
        let pdf = pdf_with_pages(&["hockey"]);
        assert!(extract(&pdf, Format::Docx).is_err());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let docx = docx_with_paragraphs(&["one", "two"]);
        assert_eq!(
            extract(&docx, Format::Docx).unwrap(),
            extract(&docx, Format::Docx).unwrap()
        );
    }
}
