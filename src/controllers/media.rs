// src/controllers/media.rs
use crate::api::{ApiClient, ApiResponse, FileUpload};
use crate::models::{MediaItem, UploadedFile};

use super::ResourceList;

/// Upload tray plus the backend media library.
///
/// `uploaded_files` lists what this session uploaded; entries are appended
/// only once the backend confirms the upload.
#[derive(Debug)]
pub struct MediaController {
    client: ApiClient,
    library: ResourceList<MediaItem>,
    uploaded_files: Vec<UploadedFile>,
    uploading: bool,
}

impl MediaController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            library: ResourceList::new(),
            uploaded_files: Vec::new(),
            uploading: false,
        }
    }

    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn library(&self) -> &ResourceList<MediaItem> {
        &self.library
    }

    /// Uploads one file after another; returns how many succeeded
    pub async fn upload_files(&mut self, files: Vec<FileUpload>) -> usize {
        self.uploading = true;
        let mut uploaded = 0;

        for file in files {
            let filename = file.filename.clone();
            match self.client.upload_file(file, None).await {
                ApiResponse::Success { data } => {
                    tracing::info!(filename = %filename, url = %data.file_url, "file uploaded");
                    self.uploaded_files.push(data);
                    uploaded += 1;
                }
                ApiResponse::Failure { error } => {
                    tracing::error!(filename = %filename, %error, "upload failed");
                }
            }
        }

        self.uploading = false;
        uploaded
    }

    /// Drops an entry from the tray; the stored file is left alone
    pub fn remove_uploaded(&mut self, filename: &str) -> bool {
        let before = self.uploaded_files.len();
        self.uploaded_files.retain(|file| file.filename != filename);
        self.uploaded_files.len() < before
    }

    pub async fn load_library(&mut self) -> bool {
        self.library.begin_load();
        let envelope = self.client.get_media().await;
        self.library.apply("media", envelope)
    }

    pub async fn delete_media(&mut self, id: &str) -> bool {
        let envelope = self.client.delete_media(id).await;
        if !self.library.note("delete media", &envelope) {
            return false;
        }
        self.load_library().await;
        true
    }
}
