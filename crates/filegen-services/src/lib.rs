//! Filegen business services
//!
//! This crate holds the generation pipeline, the retention sweep and the
//! temporary file service they both go through:
//!
//! - [`FileGenerator`]: capability trait implemented by callers for each
//!   concrete export type.
//! - [`TemporaryFileService`]: placeholder creation, payload save/load and
//!   the single removal primitive shared by user-initiated deletes and the
//!   retention sweep.
//! - [`FileGenerationService`]: turns one `(generator, user)` pair into a
//!   finalized record without blocking the submitter.
//! - [`CleanupService`]: periodic deletion of records past the retention
//!   age.

pub mod cleanup;
pub mod generation;
pub mod generator;
pub mod packaging;
pub mod temporary_file;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cleanup::CleanupService;
pub use generation::{FileGenerationService, GenerationPolicy};
pub use generator::FileGenerator;
pub use temporary_file::TemporaryFileService;
