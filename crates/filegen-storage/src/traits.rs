//! Storage abstraction trait
//!
//! This module defines the Storage trait that all blob storage backends must
//! implement.

use async_trait::async_trait;
use filegen_core::StorageBackend;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Store failed: {0}")]
    StoreFailed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for filegen_core::AppError {
    fn from(err: StorageError) -> Self {
        filegen_core::AppError::Storage(err.to_string())
    }
}

/// Blob storage abstraction
///
/// All backends persist a whole payload and hand back an opaque key; the
/// temporary file record keeps that key as its only reference to the bytes.
/// The payload is buffered in full on both store and fetch, matching how the
/// generation pipeline packages content.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a payload and return its storage key.
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;

    /// Fetch a payload by its storage key.
    ///
    /// Returns `StorageError::NotFound` when no blob exists for the key.
    async fn fetch(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a payload by its storage key. Deleting an absent key is not an
    /// error.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a payload exists for the key.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
