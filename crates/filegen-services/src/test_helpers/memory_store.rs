use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use filegen_core::models::TemporaryFile;
use filegen_core::AppError;
use filegen_db::TemporaryFileStore;

/// In-memory `TemporaryFileStore` with the same observable behavior as the
/// Postgres repository: generated ids, newest-first listings, age filtering.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    records: HashMap<i64, TemporaryFile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a record for assertions.
    pub fn get_record(&self, id: i64) -> Option<TemporaryFile> {
        self.inner.lock().unwrap().records.get(&id).cloned()
    }

    pub fn created_at(&self, id: i64) -> Option<DateTime<Utc>> {
        self.get_record(id).map(|f| f.created_at)
    }

    /// Shift a record's creation time into the past, for retention tests.
    pub fn backdate(&self, id: i64, age: Duration) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&id) {
            record.created_at -= age;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }
}

#[async_trait]
impl TemporaryFileStore for MemoryStore {
    async fn create(&self, file: &TemporaryFile) -> Result<i64, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        let mut record = file.clone();
        record.id = id;
        inner.records.insert(id, record);
        Ok(id)
    }

    async fn update(&self, file: &TemporaryFile) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(&file.id) {
            record.title = file.title.clone();
            record.description = file.description.clone();
            record.mime_type = file.mime_type.clone();
            record.size = file.size;
            record.blob_key = file.blob_key.clone();
        }
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Option<TemporaryFile>, AppError> {
        Ok(self.get_record(id))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<TemporaryFile>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut files: Vec<TemporaryFile> = inner
            .records
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(files)
    }

    async fn find_older_than(&self, days: i64) -> Result<Vec<TemporaryFile>, AppError> {
        let cutoff = Utc::now() - Duration::days(days.max(0));
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .records
            .values()
            .filter(|f| f.created_at < cutoff)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.inner.lock().unwrap().records.remove(&id);
        Ok(())
    }
}
