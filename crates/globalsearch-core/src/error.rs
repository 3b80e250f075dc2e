//! Failure types for search operations.
//!
//! Nothing in the search engine is fatal to the host process: a failure on
//! one file or directory is reported as a value and the search continues
//! with partial results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of per-path failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Permission was denied.
    PermissionDenied,
    /// The file or directory vanished mid-search.
    NotFound,
    /// The file is not valid UTF-8 text.
    InvalidData,
    /// Error reading a file.
    ReadError,
    /// Error listing a directory during traversal.
    TraversalError,
}

/// Non-fatal failure scoped to a single file or directory.
///
/// Scanning of the affected path is abandoned; the rest of the search
/// proceeds and its matches are still delivered.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SearchFailure {
    /// Path where the failure occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of failure.
    pub kind: FailureKind,
}

impl SearchFailure {
    /// Create a new failure.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a failure from an I/O error on a file, mapping the error kind.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            std::io::ErrorKind::NotFound => FailureKind::NotFound,
            std::io::ErrorKind::InvalidData => FailureKind::InvalidData,
            _ => FailureKind::ReadError,
        };
        Self {
            message: format!("{}: {error}", path.display()),
            path,
            kind,
        }
    }

    /// Create a traversal failure for a directory that could not be listed.
    pub fn traversal(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot list {}: {error}", path.display()),
            path,
            kind: FailureKind::TraversalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_kinds() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let failure = SearchFailure::from_io("/test/path", &err);
        assert_eq!(failure.kind, FailureKind::PermissionDenied);

        let err = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
        let failure = SearchFailure::from_io("/test/path", &err);
        assert_eq!(failure.kind, FailureKind::InvalidData);

        let err = std::io::Error::other("boom");
        let failure = SearchFailure::from_io("/test/path", &err);
        assert_eq!(failure.kind, FailureKind::ReadError);
    }

    #[test]
    fn test_traversal_failure() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let failure = SearchFailure::traversal("/test/dir", &err);
        assert_eq!(failure.kind, FailureKind::TraversalError);
        assert!(failure.message.contains("/test/dir"));
    }

    #[test]
    fn test_display_uses_message() {
        let failure = SearchFailure::new("/p", "something broke", FailureKind::ReadError);
        assert_eq!(failure.to_string(), "something broke");
    }
}
