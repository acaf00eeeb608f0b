#[cfg(feature = "storage-database")]
use crate::DatabaseStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use filegen_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
///
/// The database backend shares the application's connection pool, so the
/// pool is part of the factory signature whenever that backend is compiled
/// in.
#[cfg(feature = "storage-database")]
pub async fn create_storage(
    config: &Config,
    pool: sqlx::PgPool,
) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Database => Ok(Arc::new(DatabaseStorage::new(pool))),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => Ok(Arc::new(local_storage(config).await?)),

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

/// Create a storage backend based on configuration (local-only build)
#[cfg(all(not(feature = "storage-database"), feature = "storage-local"))]
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Database => Err(StorageError::ConfigError(
            "Database storage backend not available (storage-database feature not enabled)"
                .to_string(),
        )),
        StorageBackend::Local => Ok(Arc::new(local_storage(config).await?)),
    }
}

#[cfg(feature = "storage-local")]
async fn local_storage(config: &Config) -> StorageResult<LocalStorage> {
    let base_path = config.local_storage_path.clone().ok_or_else(|| {
        StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
    })?;

    LocalStorage::new(base_path).await
}
