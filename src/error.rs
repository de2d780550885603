//! Error types shared by the classifier core and its loaders

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating reference data
#[derive(Error, Debug)]
pub enum NGenderError {
    #[error("Invalid frequency data: {0}")]
    DataFormat(String),

    #[error("Frequency data integrity check failed: {0}")]
    DataIntegrity(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NGenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type NGenderResult<T> = Result<T, NGenderError>;
