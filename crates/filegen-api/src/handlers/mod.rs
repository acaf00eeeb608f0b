pub mod exports;
pub mod temporary_files;
