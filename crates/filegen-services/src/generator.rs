use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Capability trait for a file generator
///
/// Implemented by callers for each concrete export type. The pipeline only
/// ever sees this interface: the generator produces content on the
/// filesystem and declares how it should be packaged and labeled.
#[async_trait]
pub trait FileGenerator: Send + Sync {
    /// Produce the content and return its filesystem path: a single file, or
    /// a directory of files when [`has_multiple_files`](Self::has_multiple_files)
    /// is true. The pipeline deletes whatever this returns once packaging is
    /// done, on every outcome.
    async fn generate(&self) -> io::Result<PathBuf>;

    /// Declared output file name, used as the record title and as the
    /// archive name when packaging zips.
    fn file_name(&self) -> String;

    /// Declared MIME type of the packaged payload.
    fn mime_type(&self) -> String;

    /// Human description shown in the file listing.
    fn description(&self) -> String;

    /// Whether [`generate`](Self::generate) returns a directory whose
    /// immediate entries are the output files.
    fn has_multiple_files(&self) -> bool;

    /// Whether a single output file should be zipped anyway.
    fn is_zippable(&self) -> bool;
}
