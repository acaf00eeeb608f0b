use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use filegen_core::StorageBackend;
use sqlx::PgPool;
use uuid::Uuid;

/// Database-backed storage implementation
///
/// Payloads live as `bytea` rows in `filegen_physical_file`; the storage key
/// is the row's UUID. This is the default provider, matching portals that
/// keep generated files next to their metadata.
#[derive(Clone)]
pub struct DatabaseStorage {
    pool: PgPool,
}

impl DatabaseStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_key(storage_key: &str) -> StorageResult<Uuid> {
        Uuid::parse_str(storage_key)
            .map_err(|_| StorageError::InvalidKey(storage_key.to_string()))
    }
}

#[async_trait]
impl Storage for DatabaseStorage {
    #[tracing::instrument(skip(self, data), fields(db.table = "filegen_physical_file", db.operation = "insert"))]
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        let size = data.len();

        let id = sqlx::query_scalar::<sqlx::Postgres, Uuid>(
            r#"
            INSERT INTO filegen_physical_file (file_name, content_type, file_value)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(filename)
        .bind(content_type)
        .bind(&data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::StoreFailed(e.to_string()))?;

        tracing::info!(key = %id, size_bytes = size, "Database storage store successful");

        Ok(id.to_string())
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_physical_file", db.operation = "select"))]
    async fn fetch(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let id = Self::parse_key(storage_key)?;

        let row = sqlx::query_scalar::<sqlx::Postgres, Vec<u8>>(
            "SELECT file_value FROM filegen_physical_file WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::FetchFailed(e.to_string()))?;

        row.ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_physical_file", db.operation = "delete"))]
    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let id = Self::parse_key(storage_key)?;

        sqlx::query("DELETE FROM filegen_physical_file WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::DeleteFailed(e.to_string()))?;

        tracing::info!(key = %storage_key, "Database storage delete successful");

        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let id = Self::parse_key(storage_key)?;

        let exists = sqlx::query_scalar::<sqlx::Postgres, bool>(
            "SELECT EXISTS(SELECT 1 FROM filegen_physical_file WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::BackendError(e.to_string()))?;

        Ok(exists)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Database
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_rejects_garbage() {
        assert!(matches!(
            DatabaseStorage::parse_key("not-a-uuid"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(DatabaseStorage::parse_key("8c4a9adf-7f68-4e28-b45e-0a4f3f7b1f3a").is_ok());
    }
}
