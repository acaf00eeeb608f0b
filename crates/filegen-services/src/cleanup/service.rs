use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;

use crate::temporary_file::TemporaryFileService;

/// Retention sweep for temporary files
///
/// Periodically removes records whose creation time is older than the
/// configured retention age, going through the same removal primitive as
/// user-initiated deletes. One record failing to delete is logged and the
/// sweep moves on; the next run picks it up again.
#[derive(Clone)]
pub struct CleanupService {
    files: TemporaryFileService,
    /// Age threshold in days. Zero or negative means no record survives.
    retention_days: i64,
    interval_secs: u64,
}

impl CleanupService {
    pub fn new(files: TemporaryFileService, retention_days: i64, interval_secs: u64) -> Self {
        Self {
            files,
            retention_days,
            interval_secs,
        }
    }

    /// Start the background sweep loop. Runs are strictly sequential; a slow
    /// sweep delays the next tick rather than overlapping it.
    /// Returns a JoinHandle for graceful shutdown.
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(Duration::from_secs(self.interval_secs.max(1)));

            loop {
                sweep_interval.tick().await;

                tracing::info!(
                    retention_days = self.retention_days,
                    "Starting scheduled cleanup of expired temporary files"
                );

                match self.sweep().await {
                    Ok(removed) => {
                        tracing::info!(removed, "Cleanup task completed");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Cleanup task failed");
                    }
                }
            }
        })
    }

    /// Remove every record older than the retention threshold.
    ///
    /// Only listing the expired records can fail as a whole; per-record
    /// deletion errors are logged and skipped.
    #[tracing::instrument(skip(self), fields(cleanup.operation = "expire_temporary_files"))]
    pub async fn sweep(&self) -> Result<usize, anyhow::Error> {
        let expired = self.files.find_older_than(self.retention_days).await?;
        let mut removed = 0usize;

        for file in expired {
            tracing::info!(
                record_id = file.id,
                user_id = file.user_id,
                created_at = %file.created_at,
                "Deleting expired temporary file"
            );

            match self.files.remove_temporary_file(&file).await {
                Ok(()) => {
                    removed += 1;
                    tracing::debug!(record_id = file.id, "Successfully deleted expired temporary file");
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        record_id = file.id,
                        "Failed to delete expired temporary file, continuing with remaining records"
                    );
                }
            }
        }

        Ok(removed)
    }
}
