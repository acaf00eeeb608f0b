//! Database repositories for the data access layer
//!
//! `TemporaryFileRepository` owns the hand-written SQL against
//! `filegen_temporary_file`. The `TemporaryFileStore` trait is the seam the
//! service layer consumes, so services can be exercised against an in-memory
//! store in tests.

pub mod db;
pub mod store_traits;

pub use db::TemporaryFileRepository;
pub use store_traits::TemporaryFileStore;
