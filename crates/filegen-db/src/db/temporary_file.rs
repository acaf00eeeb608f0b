use async_trait::async_trait;
use chrono::{Duration, Utc};
use filegen_core::{models::TemporaryFile, AppError};
use sqlx::{PgPool, Postgres};

use crate::store_traits::TemporaryFileStore;

const SQL_SELECT_ALL: &str = "SELECT id, user_id, title, description, mime_type, size, blob_key, created_at FROM filegen_temporary_file";

/// Repository for temporary file metadata rows
#[derive(Clone)]
pub struct TemporaryFileRepository {
    pool: PgPool,
}

impl TemporaryFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemporaryFileStore for TemporaryFileRepository {
    #[tracing::instrument(skip(self, file), fields(db.table = "filegen_temporary_file", db.operation = "insert"))]
    async fn create(&self, file: &TemporaryFile) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<Postgres, i64>(
            r#"
            INSERT INTO filegen_temporary_file (user_id, title, description, mime_type, size, blob_key, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(file.user_id)
        .bind(&file.title)
        .bind(&file.description)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.blob_key)
        .bind(file.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(skip(self, file), fields(db.table = "filegen_temporary_file", db.operation = "update", db.record_id = %file.id))]
    async fn update(&self, file: &TemporaryFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE filegen_temporary_file
            SET title = $1, description = $2, mime_type = $3, size = $4, blob_key = $5
            WHERE id = $6
            "#,
        )
        .bind(&file.title)
        .bind(&file.description)
        .bind(&file.mime_type)
        .bind(file.size)
        .bind(&file.blob_key)
        .bind(file.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_temporary_file", db.operation = "select", db.record_id = %id))]
    async fn get(&self, id: i64) -> Result<Option<TemporaryFile>, AppError> {
        let file = sqlx::query_as::<Postgres, TemporaryFile>(&format!(
            "{} WHERE id = $1",
            SQL_SELECT_ALL
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file)
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_temporary_file", db.operation = "select"))]
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TemporaryFile>, AppError> {
        let files = sqlx::query_as::<Postgres, TemporaryFile>(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SQL_SELECT_ALL
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_temporary_file", db.operation = "select"))]
    async fn find_older_than(&self, days: i64) -> Result<Vec<TemporaryFile>, AppError> {
        let cutoff = Utc::now() - Duration::days(days.max(0));

        let files = sqlx::query_as::<Postgres, TemporaryFile>(&format!(
            "{} WHERE created_at < $1",
            SQL_SELECT_ALL
        ))
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    #[tracing::instrument(skip(self), fields(db.table = "filegen_temporary_file", db.operation = "delete", db.record_id = %id))]
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM filegen_temporary_file WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
