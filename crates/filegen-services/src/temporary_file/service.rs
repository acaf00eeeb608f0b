use std::sync::Arc;

use filegen_core::models::TemporaryFile;
use filegen_core::AppError;
use filegen_db::TemporaryFileStore;
use filegen_storage::Storage;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Service for temporary file records and their stored payloads
///
/// Owns the one removal primitive in the system: everything that deletes a
/// record (user action or retention sweep) goes through
/// [`remove_temporary_file`](Self::remove_temporary_file).
#[derive(Clone)]
pub struct TemporaryFileService {
    store: Arc<dyn TemporaryFileStore>,
    storage: Arc<dyn Storage>,
}

impl TemporaryFileService {
    pub fn new(store: Arc<dyn TemporaryFileStore>, storage: Arc<dyn Storage>) -> Self {
        Self { store, storage }
    }

    /// Insert the placeholder record for a generation about to run and
    /// return its id. The record is visible to listings immediately.
    pub async fn init_temporary_file(
        &self,
        user_id: i64,
        description: &str,
    ) -> Result<i64, AppError> {
        let file = TemporaryFile::placeholder(user_id, description);
        self.store.create(&file).await
    }

    /// Persist a finalized payload and return its blob key.
    pub async fn save_payload(
        &self,
        file: &TemporaryFile,
        data: Vec<u8>,
    ) -> Result<String, AppError> {
        let content_type = file.mime_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE);
        let key = self.storage.store(&file.title, content_type, data).await?;
        Ok(key)
    }

    /// Load the stored payload for a record.
    ///
    /// Rejects records that have no blob yet (generation still running,
    /// failed or rejected) instead of crashing on a missing handle.
    pub async fn load_payload(&self, file: &TemporaryFile) -> Result<Vec<u8>, AppError> {
        let key = file.blob_key.as_deref().ok_or_else(|| {
            AppError::NotGenerated(format!("temporary file {} has no stored payload", file.id))
        })?;
        let data = self.storage.fetch(key).await?;
        Ok(data)
    }

    pub async fn get(&self, id: i64) -> Result<Option<TemporaryFile>, AppError> {
        self.store.get(id).await
    }

    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<TemporaryFile>, AppError> {
        self.store.find_by_user(user_id).await
    }

    pub async fn find_older_than(&self, days: i64) -> Result<Vec<TemporaryFile>, AppError> {
        self.store.find_older_than(days).await
    }

    pub async fn update(&self, file: &TemporaryFile) -> Result<(), AppError> {
        self.store.update(file).await
    }

    /// Remove a record and its payload. The blob is deleted only when a
    /// handle was recorded; the metadata row always is.
    pub async fn remove_temporary_file(&self, file: &TemporaryFile) -> Result<(), AppError> {
        if let Some(key) = &file.blob_key {
            self.storage.delete(key).await?;
        }
        self.store.delete(file.id).await
    }
}
