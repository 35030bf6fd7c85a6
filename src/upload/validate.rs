use crate::error::ValidationError;
use crate::models::{Format, UploadedDocument};
use crate::utils::get_extension;

/// Decide from the client filename whether an upload is accepted.
///
/// `None` means the request carried no file part at all. A name is accepted
/// only if it has a '.' and the text after the last one is `pdf` or `docx`,
/// in any case.
pub fn validate(filename: Option<&str>) -> Result<Format, ValidationError> {
    let filename = filename.ok_or(ValidationError::NoFilePart)?;
    if filename.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    let ext = get_extension(filename).unwrap_or_default();
    Format::from_extension(&ext).ok_or(ValidationError::DisallowedExtension(ext))
}

/// Validate and wrap an upload in one step
pub fn accept(filename: Option<&str>, content: Vec<u8>) -> Result<UploadedDocument, ValidationError> {
    let format = validate(filename)?;
    // validate() already ruled out None
    let filename = filename.unwrap_or_default().to_string();
    Ok(UploadedDocument::new(filename, format, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uppercase_pdf() {
        assert_eq!(validate(Some("report.PDF")), Ok(Format::Pdf));
    }

    #[test]
    fn test_validate_docx() {
        assert_eq!(validate(Some("season.review.docx")), Ok(Format::Docx));
    }

    #[test]
    fn test_validate_no_extension() {
        assert_eq!(
            validate(Some("report")),
            Err(ValidationError::DisallowedExtension(String::new()))
        );
    }

    #[test]
    fn test_validate_disallowed_extension() {
        assert_eq!(
            validate(Some("image.png")),
            Err(ValidationError::DisallowedExtension("png".to_string()))
        );
        assert!(validate(Some("legacy.doc")).is_err());
        assert!(validate(Some("report.pdf.exe")).is_err());
    }

    #[test]
    fn test_validate_missing_file_part() {
        assert_eq!(validate(None), Err(ValidationError::NoFilePart));
    }

    #[test]
    fn test_validate_empty_filename() {
        assert_eq!(validate(Some("")), Err(ValidationError::EmptyFilename));
    }

    #[test]
    fn test_validate_only_extension() {
        assert_eq!(validate(Some(".pdf")), Ok(Format::Pdf));
    }

    #[test]
    fn test_accept_builds_document() {
        let doc = accept(Some("Match.Docx"), b"bytes".to_vec()).unwrap();
        assert_eq!(doc.filename, "Match.Docx");
        assert_eq!(doc.format, Format::Docx);
        assert_eq!(doc.content, b"bytes");
    }

    #[test]
    fn test_accept_rejects() {
        assert_eq!(
            accept(Some("notes.txt"), Vec::new()),
            Err(ValidationError::DisallowedExtension("txt".to_string()))
        );
    }
}
