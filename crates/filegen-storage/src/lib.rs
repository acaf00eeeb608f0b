//! Filegen Storage Library
//!
//! This crate provides the blob storage abstraction used to persist generated
//! payloads, and its two backends:
//!
//! - **database**: payloads stored as rows in the portal database (the
//!   default provider).
//! - **local**: payloads stored as files under a configured base directory.
//!
//! Keys are opaque to callers. The metadata row only ever holds the key
//! returned by [`Storage::store`]; it never interprets it.

#[cfg(feature = "storage-database")]
pub mod database;
pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-database")]
pub use database::DatabaseStorage;
pub use factory::create_storage;
pub use filegen_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
