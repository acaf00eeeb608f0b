//! Test helpers: in-memory metadata store and mock generators
//!
//! These let the pipeline and the retention sweep run against real blob
//! storage (a tempdir `LocalStorage`) without a database.

mod memory_store;
mod mock_generator;

pub use memory_store::MemoryStore;
pub use mock_generator::MockFileGenerator;
