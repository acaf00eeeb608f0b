//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use filegen_core::Config;
use filegen_services::{
    CleanupService, FileGenerationService, GenerationPolicy, TemporaryFileService,
};

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(AppState, axum::Router)> {
    // Initialize telemetry first
    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        storage_backend = %config.storage_backend,
        max_file_size = config.max_file_size,
        retention_days = config.retention_days,
        "Configuration loaded"
    );

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage
    let storage = filegen_storage::create_storage(&config, pool.clone()).await?;

    // Wire services
    let repository = Arc::new(filegen_db::TemporaryFileRepository::new(pool.clone()));
    let files = TemporaryFileService::new(repository, storage);
    let generation = FileGenerationService::new(
        files.clone(),
        GenerationPolicy {
            max_file_size: config.max_file_size,
            file_too_big_message: config.file_too_big_message.clone(),
        },
    );

    // Start the retention sweep loop
    let cleanup = Arc::new(CleanupService::new(
        files.clone(),
        config.retention_days,
        config.cleanup_interval_secs,
    ));
    cleanup.start();

    let state = AppState {
        pool,
        files,
        generation,
    };

    // Setup routes
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
