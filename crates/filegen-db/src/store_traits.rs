//! Repository trait abstraction for the service layer
//!
//! Defines the minimal interface the generation pipeline and retention sweep
//! need from the metadata store, allowing for mocking without a database.

use async_trait::async_trait;
use filegen_core::models::TemporaryFile;
use filegen_core::AppError;

/// Operations the service layer needs from the temporary file metadata store.
#[async_trait]
pub trait TemporaryFileStore: Send + Sync {
    /// Insert a new record and return its generated id.
    async fn create(&self, file: &TemporaryFile) -> Result<i64, AppError>;

    /// Overwrite a record's mutable fields (title, description, mime type,
    /// size, blob key). `id`, `user_id` and `created_at` are never altered.
    async fn update(&self, file: &TemporaryFile) -> Result<(), AppError>;

    /// Load a record by id.
    async fn get(&self, id: i64) -> Result<Option<TemporaryFile>, AppError>;

    /// All records owned by a user, newest first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TemporaryFile>, AppError>;

    /// All records created more than `days` days ago. Zero or negative
    /// matches every record.
    async fn find_older_than(&self, days: i64) -> Result<Vec<TemporaryFile>, AppError>;

    /// Delete a record by id.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
