//! Error types for the sakura-ml crate.

use std::path::Path;
use thiserror::Error;

/// Top-level error type for dataset, training, and inference operations.
#[derive(Debug, Error)]
pub enum MlError {
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MlError {
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Map an IO error on `path` to `NotFound` when the file is missing.
    pub(crate) fn from_io_at(err: std::io::Error, path: &Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::not_found(path.display().to_string())
        } else {
            Self::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let mapped = MlError::from_io_at(err, Path::new("data.csv"));
        assert!(matches!(mapped, MlError::NotFound(ref p) if p == "data.csv"));
    }

    #[test]
    fn test_other_io_errors_pass_through() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let mapped = MlError::from_io_at(err, Path::new("data.csv"));
        assert!(matches!(mapped, MlError::Io(_)));
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(
            MlError::training("empty split").to_string(),
            "Training error: empty split"
        );
        assert_eq!(
            MlError::not_found("model.json").to_string(),
            "Not found: model.json"
        );
    }
}
