//! Storage error types for alm-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from file storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing, or removing a file or directory failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A YAML document could not be parsed or serialized.
    #[error("YAML error in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The frontmatter block of a markdown file is malformed.
    #[error("Failed to parse YAML frontmatter: {0}")]
    Frontmatter(String),

    /// A file parsed but is missing required fields or holds bad values.
    #[error("Invalid data in {}: {reason}", .path.display())]
    InvalidData { path: PathBuf, reason: String },

    /// An entry was saved into a research whose directory does not exist.
    #[error("Research directory not found: {}", .0.display())]
    ResearchDirMissing(PathBuf),

    #[error(transparent)]
    Core(#[from] alm_core::errors::CoreError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
