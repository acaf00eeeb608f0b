use std::path::Path;
use std::sync::Arc;

use filegen_core::models::temporary_file::SIZE_FAILED;
use filegen_core::models::TemporaryFile;
use filegen_core::AppError;
use tokio::sync::Mutex;

use crate::generator::FileGenerator;
use crate::packaging;
use crate::temporary_file::TemporaryFileService;

/// Generation size and messaging policy, taken from configuration.
#[derive(Clone, Debug)]
pub struct GenerationPolicy {
    /// Maximum payload size in bytes. 0 = unlimited.
    pub max_file_size: i64,
    /// Title substituted when a payload is rejected for being too big.
    pub file_too_big_message: String,
}

/// Service that generates and saves temporary files
///
/// `submit` inserts the placeholder record synchronously and runs the rest of
/// the job on a spawned task. Content production runs concurrently across
/// jobs; the finalize stage (packaging, size check, blob store, metadata
/// update, filesystem cleanup) is serialized process-wide by one mutex so a
/// burst of submissions cannot zip everything at once.
#[derive(Clone)]
pub struct FileGenerationService {
    files: TemporaryFileService,
    policy: GenerationPolicy,
    finalize_lock: Arc<Mutex<()>>,
}

impl FileGenerationService {
    pub fn new(files: TemporaryFileService, policy: GenerationPolicy) -> Self {
        Self {
            files,
            policy,
            finalize_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Submit one generation job and return the new record's id.
    ///
    /// Only the placeholder insert can fail here; everything after it is
    /// absorbed into the record's terminal state and never reported to the
    /// submitter.
    pub async fn submit(
        &self,
        generator: Arc<dyn FileGenerator>,
        user_id: i64,
    ) -> Result<i64, AppError> {
        let id = self
            .files
            .init_temporary_file(user_id, &generator.description())
            .await?;

        let service = self.clone();
        tokio::spawn(async move {
            service.run_generation(id, generator).await;
        });

        Ok(id)
    }

    /// Run one generation job to its terminal state. Public only through
    /// `submit`'s spawned task; tests drive it directly to avoid polling.
    pub(crate) async fn run_generation(&self, id: i64, generator: Arc<dyn FileGenerator>) {
        let produced = match generator.generate().await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(record_id = id, error = %e, "Error generating temporary file");
                None
            }
        };

        let _guard = self.finalize_lock.lock().await;
        self.finalize(id, generator.as_ref(), produced.as_deref())
            .await;
    }

    /// Finalize stage: package, apply the size policy, store, clean up the
    /// produced artifacts and persist the terminal record state.
    async fn finalize(&self, id: i64, generator: &dyn FileGenerator, produced: Option<&Path>) {
        let mut file = match self.files.get(id).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                tracing::warn!(record_id = id, "Temporary file record vanished before finalization");
                if let Some(path) = produced {
                    packaging::cleanup_produced(path).await;
                }
                return;
            }
            Err(e) => {
                tracing::error!(record_id = id, error = %e, "Failed to load temporary file for finalization");
                if let Some(path) = produced {
                    packaging::cleanup_produced(path).await;
                }
                return;
            }
        };

        match produced {
            Some(path) => {
                self.package_and_store(&mut file, generator, path).await;
                packaging::cleanup_produced(path).await;
            }
            None => {
                // Content production failed; skip packaging entirely.
                file.size = SIZE_FAILED;
            }
        }

        if let Err(e) = self.files.update(&file).await {
            tracing::error!(record_id = id, error = %e, "Failed to persist finalized temporary file");
        }
    }

    async fn package_and_store(
        &self,
        file: &mut TemporaryFile,
        generator: &dyn FileGenerator,
        produced: &Path,
    ) {
        let payload = match packaging::build_payload(generator, produced).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(record_id = file.id, error = %e, "Error storing temporary file");
                self.mark_failed(file);
                return;
            }
        };

        let size = payload.len() as i64;
        if self.policy.max_file_size > 0 && size > self.policy.max_file_size {
            file.title = self.policy.file_too_big_message.clone();
            file.size = size;
            tracing::error!(
                record_id = file.id,
                size_bytes = size,
                max_bytes = self.policy.max_file_size,
                "Generated file too big"
            );
            return;
        }

        file.title = generator.file_name();
        file.mime_type = Some(generator.mime_type());
        match self.files.save_payload(file, payload).await {
            Ok(key) => {
                file.blob_key = Some(key);
                file.size = size;
            }
            Err(e) => {
                tracing::error!(record_id = file.id, error = %e, "Error storing temporary file");
                self.mark_failed(file);
            }
        }
    }

    fn mark_failed(&self, file: &mut TemporaryFile) {
        file.title = String::new();
        file.mime_type = None;
        file.blob_key = None;
        file.size = SIZE_FAILED;
    }
}
