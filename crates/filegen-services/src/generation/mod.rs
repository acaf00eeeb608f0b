pub mod service;

pub use service::{FileGenerationService, GenerationPolicy};
