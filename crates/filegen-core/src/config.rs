//! Configuration module
//!
//! Environment-driven configuration for the filegen services: database,
//! storage backend selection, generation size policy and retention policy.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RETENTION_DAYS: i64 = 30;
const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 3600;
const DEFAULT_FILE_TOO_BIG_MESSAGE: &str =
    "The generated file exceeds the maximum allowed size";

/// Application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Blob storage provider selector.
    pub storage_backend: StorageBackend,
    /// Base directory for the local storage backend. Required when
    /// `storage_backend` is `local`.
    pub local_storage_path: Option<String>,
    /// Maximum payload size in bytes. 0 = unlimited.
    pub max_file_size: i64,
    /// Age in days after which the retention sweep removes a record.
    /// Zero or negative means no record survives a sweep.
    pub retention_days: i64,
    /// Period of the retention sweep loop.
    pub cleanup_interval_secs: u64,
    /// User-facing title substituted when a payload is rejected as too big.
    pub file_too_big_message: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let storage_backend = env::var("FILEGEN_STORAGE_BACKEND")
            .ok()
            .map(|s| StorageBackend::from_str(&s))
            .transpose()?
            .unwrap_or(StorageBackend::Database);

        Ok(Config {
            database_url,
            server_port: env::var("SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            max_file_size: env::var("FILEGEN_MAX_FILE_SIZE")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("FILEGEN_MAX_FILE_SIZE must be a valid number"))?,
            retention_days: env::var("FILEGEN_RETENTION_DAYS")
                .unwrap_or_else(|_| DEFAULT_RETENTION_DAYS.to_string())
                .parse()
                .unwrap_or(DEFAULT_RETENTION_DAYS),
            cleanup_interval_secs: env::var("FILEGEN_CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| DEFAULT_CLEANUP_INTERVAL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS),
            file_too_big_message: env::var("FILEGEN_FILE_TOO_BIG_MESSAGE")
                .unwrap_or_else(|_| DEFAULT_FILE_TOO_BIG_MESSAGE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Only DATABASE_URL is mandatory; everything else has a default.
        let config = Config {
            database_url: "postgres://localhost/filegen".to_string(),
            server_port: DEFAULT_SERVER_PORT,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            db_timeout_seconds: DEFAULT_CONNECTION_TIMEOUT_SECS,
            storage_backend: StorageBackend::Database,
            local_storage_path: None,
            max_file_size: 0,
            retention_days: DEFAULT_RETENTION_DAYS,
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            file_too_big_message: DEFAULT_FILE_TOO_BIG_MESSAGE.to_string(),
        };
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.max_file_size, 0);
        assert_eq!(config.storage_backend, StorageBackend::Database);
    }
}
