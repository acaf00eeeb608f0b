pub mod temporary_file;

pub use temporary_file::TemporaryFile;
