// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing source repositories: {}", .0.join(", "))]
    MissingRepositories(Vec<String>),

    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to copy {from} to {to}: {source}")]
    AssetCopy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SyncError {
    pub(crate) fn file_op(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOperation {
            path: path.into(),
            source,
        }
    }

    /// True for errors that must stop the whole run before anything is written.
    pub fn is_fatal_precondition(&self) -> bool {
        matches!(self, Self::MissingRepositories(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_repositories_message() {
        let err = SyncError::MissingRepositories(vec!["repo-a".into(), "repo-b (not a directory)".into()]);
        assert_eq!(
            err.to_string(),
            "Missing source repositories: repo-a, repo-b (not a directory)"
        );
        assert!(err.is_fatal_precondition());
    }

    #[test]
    fn test_per_mapping_errors_are_not_fatal() {
        let err = SyncError::SourceNotFound(PathBuf::from("repo/README.md"));
        assert!(!err.is_fatal_precondition());
    }
}
