pub mod service;

pub use service::CleanupService;
