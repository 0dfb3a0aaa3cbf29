// src/api/upload.rs
use std::path::Path;

use crate::error::{Error, FileOperation, Result};
use crate::models::FileKind;
use crate::platform::MultipartForm;

/// A file about to be sent as multipart form data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileUpload {
    /// Content type is guessed from the file extension
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = FileKind::mime_for(&filename).map(str::to_string);
        Self {
            filename,
            content_type,
            data,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::file(
                    path.display().to_string(),
                    FileOperation::Read,
                    "Path has no usable file name",
                )
            })?
            .to_string();

        let data = tokio::fs::read(path).await.map_err(|e| {
            Error::file(
                path.display().to_string(),
                FileOperation::Read,
                format!("Failed to read {}: {}", path.display(), e),
            )
        })?;

        Ok(Self::new(filename, data))
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Form with the file under `field`
    pub(crate) fn into_form(self, field: &str) -> MultipartForm {
        MultipartForm::new().file(field, self.filename, self.content_type, self.data)
    }
}
