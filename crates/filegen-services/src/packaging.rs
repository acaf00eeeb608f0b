//! Payload packaging
//!
//! Turns a generator's produced path into the byte payload that gets stored:
//! a zip of a directory's immediate entries, a zip of a single file, or the
//! file's raw bytes. Archives are built in memory, so no intermediate
//! archive file ever touches the disk.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::generator::FileGenerator;

/// Sanitize a filename for an archive entry to prevent path traversal.
/// Extracts only the base name (strips path components like `../`).
fn sanitize_archive_filename(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// Build the stored payload for a produced path, honoring the generator's
/// packaging declaration.
pub async fn build_payload(generator: &dyn FileGenerator, produced: &Path) -> Result<Vec<u8>> {
    if generator.has_multiple_files() {
        let entries = immediate_entries(produced).await?;
        create_zip_payload(&entries).await
    } else if generator.is_zippable() {
        create_zip_payload(std::slice::from_ref(&produced.to_path_buf())).await
    } else {
        tokio::fs::read(produced)
            .await
            .with_context(|| format!("Failed to read produced file: {}", produced.display()))
    }
}

/// Immediate entries of the produced directory, in directory order.
async fn immediate_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to list produced directory: {}", dir.display()))?;
    while let Some(entry) = read_dir.next_entry().await? {
        entries.push(entry.path());
    }
    Ok(entries)
}

/// Create a ZIP payload from the given files
async fn create_zip_payload(files: &[PathBuf]) -> Result<Vec<u8>> {
    use zip::write::{FileOptions, ZipWriter};
    use zip::CompressionMethod;

    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (index, path) in files.iter().enumerate() {
            let file_data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            let safe_filename = sanitize_archive_filename(
                &path.to_string_lossy(),
                &format!("unnamed_{}", index),
            );

            zip.start_file(&safe_filename, options)
                .with_context(|| format!("Failed to add file to ZIP: {}", safe_filename))?;
            zip.write_all(&file_data)
                .with_context(|| format!("Failed to write file data to ZIP: {}", safe_filename))?;
        }

        zip.finish().context("Failed to finalize ZIP archive")?;
    }

    Ok(buffer)
}

/// Delete whatever a generator produced: immediate entries then the
/// directory itself, or the single file. Failures are logged, never
/// propagated, so cleanup runs to the end on every exit path.
pub async fn cleanup_produced(produced: &Path) {
    let is_dir = tokio::fs::metadata(produced)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    if is_dir {
        match tokio::fs::read_dir(produced).await {
            Ok(mut read_dir) => loop {
                match read_dir.next_entry().await {
                    Ok(Some(entry)) => {
                        let path = entry.path();
                        let result = if path.is_dir() {
                            tokio::fs::remove_dir_all(&path).await
                        } else {
                            tokio::fs::remove_file(&path).await
                        };
                        if let Err(e) = result {
                            tracing::warn!(path = %path.display(), error = %e, "Failed to delete produced entry");
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(path = %produced.display(), error = %e, "Failed to iterate produced directory");
                        break;
                    }
                }
            },
            Err(e) => {
                tracing::warn!(path = %produced.display(), error = %e, "Failed to list produced directory");
            }
        }
        if let Err(e) = tokio::fs::remove_dir(produced).await {
            tracing::warn!(path = %produced.display(), error = %e, "Failed to delete produced directory");
        }
    } else if let Err(e) = tokio::fs::remove_file(produced).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %produced.display(), error = %e, "Failed to delete produced file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    struct DeclOnly {
        multiple: bool,
        zippable: bool,
    }

    #[async_trait::async_trait]
    impl FileGenerator for DeclOnly {
        async fn generate(&self) -> std::io::Result<PathBuf> {
            unreachable!("packaging tests never call generate")
        }
        fn file_name(&self) -> String {
            "archive.zip".to_string()
        }
        fn mime_type(&self) -> String {
            "application/zip".to_string()
        }
        fn description(&self) -> String {
            "decl".to_string()
        }
        fn has_multiple_files(&self) -> bool {
            self.multiple
        }
        fn is_zippable(&self) -> bool {
            self.zippable
        }
    }

    fn zip_entry_names(payload: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(payload)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_sanitize_archive_filename() {
        assert_eq!(
            sanitize_archive_filename("../../etc/passwd", "fallback"),
            "passwd"
        );
        assert_eq!(
            sanitize_archive_filename("report.csv", "fallback"),
            "report.csv"
        );
        assert_eq!(sanitize_archive_filename("", "fallback"), "fallback");
        assert_eq!(sanitize_archive_filename("..", "fallback"), "fallback");
    }

    #[tokio::test]
    async fn test_single_file_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let generator = DeclOnly {
            multiple: false,
            zippable: false,
        };
        let payload = build_payload(&generator, &path).await.unwrap();
        assert_eq!(payload, b"hello");
    }

    #[tokio::test]
    async fn test_single_zippable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let generator = DeclOnly {
            multiple: false,
            zippable: true,
        };
        let payload = build_payload(&generator, &path).await.unwrap();

        let names = zip_entry_names(&payload);
        assert_eq!(names, vec!["report.csv"]);

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(&payload)).unwrap();
        let mut content = String::new();
        archive
            .by_name("report.csv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_multiple_files_zipped() {
        let dir = tempdir().unwrap();
        let produced = dir.path().join("out");
        tokio::fs::create_dir(&produced).await.unwrap();
        tokio::fs::write(produced.join("test1.csv"), b"one")
            .await
            .unwrap();
        tokio::fs::write(produced.join("test2.csv"), b"two")
            .await
            .unwrap();

        let generator = DeclOnly {
            multiple: true,
            zippable: false,
        };
        let payload = build_payload(&generator, &produced).await.unwrap();

        let mut names = zip_entry_names(&payload);
        names.sort();
        assert_eq!(names, vec!["test1.csv", "test2.csv"]);
    }

    #[tokio::test]
    async fn test_cleanup_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        tokio::fs::write(&path, b"x").await.unwrap();

        cleanup_produced(&path).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_cleanup_directory_with_entries() {
        let dir = tempdir().unwrap();
        let produced = dir.path().join("out");
        tokio::fs::create_dir(&produced).await.unwrap();
        tokio::fs::write(produced.join("a.csv"), b"x").await.unwrap();
        tokio::fs::create_dir(produced.join("nested")).await.unwrap();

        cleanup_produced(&produced).await;
        assert!(!produced.exists());
    }

    #[tokio::test]
    async fn test_cleanup_missing_path_is_silent() {
        let dir = tempdir().unwrap();
        cleanup_produced(&dir.path().join("never-existed.csv")).await;
    }
}
