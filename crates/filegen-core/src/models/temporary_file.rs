use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to a record at placeholder creation, before generation has
/// produced a real file name.
pub const PLACEHOLDER_TITLE: &str = "temp";

/// Sentinel size meaning "generation failed".
pub const SIZE_FAILED: i64 = -1;

/// A temporary file record: the metadata row backing one generated file.
///
/// The row is inserted as a placeholder before content generation starts and
/// finalized once with exactly one terminal outcome (stored, oversize
/// rejected, or failed). `id`, `user_id` and `created_at` never change after
/// insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TemporaryFile {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub mime_type: Option<String>,
    /// Byte count of the stored payload, or [`SIZE_FAILED`] when generation
    /// failed. Kept at the real (oversize) length on size-limit rejection.
    pub size: i64,
    /// Opaque handle into the blob store. `None` until the payload has been
    /// stored; stays `None` forever on failure or rejection.
    pub blob_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TemporaryFile {
    /// Build the placeholder row inserted before generation runs.
    pub fn placeholder(user_id: i64, description: impl Into<String>) -> Self {
        TemporaryFile {
            id: 0,
            user_id,
            title: PLACEHOLDER_TITLE.to_string(),
            description: description.into(),
            mime_type: None,
            size: 0,
            blob_key: None,
            created_at: Utc::now(),
        }
    }

    /// Whether generation recorded an I/O failure for this record.
    pub fn is_failed(&self) -> bool {
        self.size == SIZE_FAILED
    }

    /// Whether a payload was stored and the record can be downloaded.
    pub fn is_downloadable(&self) -> bool {
        self.blob_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_defaults() {
        let file = TemporaryFile::placeholder(42, "monthly export");
        assert_eq!(file.title, PLACEHOLDER_TITLE);
        assert_eq!(file.user_id, 42);
        assert_eq!(file.description, "monthly export");
        assert_eq!(file.size, 0);
        assert!(file.blob_key.is_none());
        assert!(!file.is_failed());
        assert!(!file.is_downloadable());
    }

    #[test]
    fn test_failed_is_never_downloadable() {
        let mut file = TemporaryFile::placeholder(1, "x");
        file.size = SIZE_FAILED;
        assert!(file.is_failed());
        assert!(!file.is_downloadable());
    }
}
