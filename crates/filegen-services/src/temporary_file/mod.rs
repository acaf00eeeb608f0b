pub mod service;

pub use service::TemporaryFileService;
