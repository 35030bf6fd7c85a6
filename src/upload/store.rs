use crate::error::{Result, ValidationError};
use crate::models::UploadedDocument;
use crate::utils::sanitize_filename;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes uploads into the configured folder for the length of a request
#[derive(Debug, Clone)]
pub struct UploadStore {
    folder: PathBuf,
}

impl UploadStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Write the document under its sanitised name, creating the folder if
    /// needed. The file is removed when the returned guard is dropped.
    pub fn save(&self, document: &UploadedDocument) -> Result<StoredUpload> {
        let name = sanitize_filename(&document.filename);
        if name.is_empty() {
            return Err(ValidationError::EmptyFilename.into());
        }

        fs::create_dir_all(&self.folder)?;
        let path = self.folder.join(name);
        fs::write(&path, &document.content)?;
        debug!("stored upload {} ({} bytes)", path.display(), document.content.len());

        Ok(StoredUpload { path })
    }
}

/// An upload on disk; deleted on drop
#[derive(Debug)]
pub struct StoredUpload {
    path: PathBuf,
}

impl StoredUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("failed to remove upload {}: {}", self.path.display(), e);
        }
    }
}
