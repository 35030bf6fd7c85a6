use crate::error::ExtractionError;
use crate::models::Format;

/// Trait for text extractors that turn a document's raw bytes into plain text
pub trait TextExtractor: Send + Sync {
    /// Extract text content from the document bytes
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError>;

    /// The format this extractor reads
    fn format(&self) -> Format;

    /// Check if this extractor supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        Format::from_extension(ext) == Some(self.format())
    }
}
