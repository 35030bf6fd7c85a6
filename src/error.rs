use thiserror::Error;

/// Why an upload was turned away before any extraction happened.
///
/// The `Display` text is what the upload page shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No file part")]
    NoFilePart,
    #[error("No selected file")]
    EmptyFilename,
    /// Carries the offending extension, empty when the name has none
    #[error("Unsupported file type")]
    DisallowedExtension(String),
}

/// The bytes were not a well-formed document of the declared format.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to parse PDF: {0}")]
    Pdf(String),
    #[error("failed to open DOCX container: {0}")]
    Container(String),
    #[error("DOCX container has no word/document.xml")]
    MissingDocumentPart,
    #[error("malformed DOCX document XML: {0}")]
    Xml(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(ValidationError::NoFilePart.to_string(), "No file part");
        assert_eq!(ValidationError::EmptyFilename.to_string(), "No selected file");
        assert_eq!(
            ValidationError::DisallowedExtension("png".to_string()).to_string(),
            "Unsupported file type"
        );
    }

    #[test]
    fn test_error_wraps_validation_transparently() {
        let err: Error = ValidationError::EmptyFilename.into();
        assert_eq!(err.to_string(), "No selected file");
        assert!(matches!(err, Error::Validation(ValidationError::EmptyFilename)));
    }
}
