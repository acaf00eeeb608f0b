//! Database repositories
//
// Temporary file metadata repository
pub mod temporary_file;

pub use temporary_file::TemporaryFileRepository;
