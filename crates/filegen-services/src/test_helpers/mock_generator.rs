use std::io;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use crate::generator::FileGenerator;

enum Behavior {
    /// One file `report.csv` with the given content.
    Single { content: String, delay: Duration },
    /// A directory of `(name, content)` output files.
    Multiple(Vec<(String, String)>),
    /// `generate` fails with an I/O error.
    Fail,
    /// `generate` returns a path that does not exist.
    Vanished,
}

/// Configurable mock generator writing real files under a tempdir.
pub struct MockFileGenerator {
    behavior: Behavior,
    root: PathBuf,
}

impl MockFileGenerator {
    fn with_behavior(behavior: Behavior) -> Self {
        let dir = tempfile::tempdir().expect("create mock generator dir");
        Self {
            behavior,
            root: dir.keep(),
        }
    }

    pub fn single(content: &str) -> Self {
        Self::with_behavior(Behavior::Single {
            content: content.to_string(),
            delay: Duration::ZERO,
        })
    }

    pub fn slow(content: &str, delay: Duration) -> Self {
        Self::with_behavior(Behavior::Single {
            content: content.to_string(),
            delay,
        })
    }

    pub fn multiple(entries: &[(&str, &str)]) -> Self {
        Self::with_behavior(Behavior::Multiple(
            entries
                .iter()
                .map(|(name, content)| (name.to_string(), content.to_string()))
                .collect(),
        ))
    }

    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    pub fn vanished() -> Self {
        Self::with_behavior(Behavior::Vanished)
    }

    /// Path `generate` will return, for asserting cleanup afterwards.
    pub fn root_path(&self) -> PathBuf {
        match &self.behavior {
            Behavior::Single { .. } => self.root.join("report.csv"),
            Behavior::Multiple(_) => self.root.join("out"),
            Behavior::Fail | Behavior::Vanished => self.root.join("ghost.csv"),
        }
    }
}

#[async_trait]
impl FileGenerator for MockFileGenerator {
    async fn generate(&self) -> io::Result<PathBuf> {
        match &self.behavior {
            Behavior::Single { content, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                let path = self.root.join("report.csv");
                tokio::fs::write(&path, content).await?;
                Ok(path)
            }
            Behavior::Multiple(entries) => {
                let dir = self.root.join("out");
                tokio::fs::create_dir_all(&dir).await?;
                for (name, content) in entries {
                    tokio::fs::write(dir.join(name), content).await?;
                }
                Ok(dir)
            }
            Behavior::Fail => Err(io::Error::other("mock generation failure")),
            Behavior::Vanished => Ok(self.root.join("ghost.csv")),
        }
    }

    fn file_name(&self) -> String {
        "report.csv".to_string()
    }

    fn mime_type(&self) -> String {
        "text/csv".to_string()
    }

    fn description(&self) -> String {
        "Mock export".to_string()
    }

    fn has_multiple_files(&self) -> bool {
        matches!(self.behavior, Behavior::Multiple(_))
    }

    fn is_zippable(&self) -> bool {
        false
    }
}
