use serde::{Deserialize, Serialize};
use std::fmt;

/// Document formats the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Pdf,
    Docx,
}

impl Format {
    /// Resolve a bare extension (without the dot), ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Format::Pdf),
            "docx" => Some(Format::Docx),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A document received for a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Filename as supplied by the client
    pub filename: String,
    /// Format resolved during validation
    pub format: Format,
    /// Raw file content
    pub content: Vec<u8>,
    /// Blake3 hash of the content
    pub hash: String,
}

impl UploadedDocument {
    pub fn new(filename: String, format: Format, content: Vec<u8>) -> Self {
        let hash = crate::utils::compute_hash(&content);
        Self {
            filename,
            format,
            content,
            hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_ignores_case() {
        assert_eq!(Format::from_extension("PDF"), Some(Format::Pdf));
        assert_eq!(Format::from_extension("Docx"), Some(Format::Docx));
        assert_eq!(Format::from_extension("doc"), None);
        assert_eq!(Format::from_extension(""), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(Format::Pdf.to_string(), "pdf");
        assert_eq!(Format::Docx.to_string(), "docx");
    }

    #[test]
    fn test_uploaded_document_hashes_content() {
        let doc = UploadedDocument::new("a.pdf".to_string(), Format::Pdf, b"abc".to_vec());
        let same = UploadedDocument::new("b.pdf".to_string(), Format::Pdf, b"abc".to_vec());
        assert_eq!(doc.hash.len(), 64);
        assert_eq!(doc.hash, same.hash);
    }

    #[test]
    fn test_format_serialization() {
        let serialized = serde_json::to_string(&Format::Docx).unwrap();
        assert_eq!(serialized, "\"docx\"");
        let deserialized: Format = serde_json::from_str("\"pdf\"").unwrap();
        assert_eq!(deserialized, Format::Pdf);
    }
}
