//! Application state shared by all handlers.

use filegen_services::{FileGenerationService, TemporaryFileService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub files: TemporaryFileService,
    pub generation: FileGenerationService,
}
