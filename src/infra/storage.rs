//! Document blob storage.
//!
//! Uploaded files are written to a flat directory on local disk under a
//! random name, and served back through the static `/uploads` route. The
//! stored URL is what gets persisted on the document record.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::{ALLOWED_FILE_TYPES, MAX_FILE_SIZE, MAX_FILE_SIZE_MB, UPLOAD_URL_PREFIX};
use crate::errors::{AppError, AppResult};

/// A stored file: the public URL plus the original filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    pub original_name: String,
}

#[async_trait::async_trait]
pub trait BlobStorage: Send + Sync {
    /// Validates and persists an uploaded file, returning its public URL.
    async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> AppResult<StoredFile>;
}

/// Local-disk implementation backed by the configured upload directory.
pub struct FileStore {
    upload_dir: PathBuf,
}

impl FileStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn validate(content_type: &str, size: usize) -> AppResult<()> {
        if size > MAX_FILE_SIZE {
            return Err(AppError::PayloadTooLarge(MAX_FILE_SIZE_MB));
        }
        if !ALLOWED_FILE_TYPES.contains(&content_type) {
            return Err(AppError::UnsupportedMediaType);
        }
        Ok(())
    }

    fn extension(original_name: &str) -> Option<&str> {
        Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
    }
}

#[async_trait::async_trait]
impl BlobStorage for FileStore {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn store(
        &self,
        original_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> AppResult<StoredFile> {
        Self::validate(content_type, data.len())?;

        let file_name = match Self::extension(original_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

        let path = self.upload_dir.join(&file_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write upload: {e}")))?;

        debug!(file = %file_name, "Stored uploaded document");

        Ok(StoredFile {
            url: format!("{UPLOAD_URL_PREFIX}/{file_name}"),
            original_name: original_name.to_string(),
        })
    }
}
