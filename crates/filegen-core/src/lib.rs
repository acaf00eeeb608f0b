//! Filegen Core Library
//!
//! This crate provides the domain model, error types and configuration that
//! are shared across all filegen components.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::Config;
pub use error::AppError;
pub use storage_types::StorageBackend;
