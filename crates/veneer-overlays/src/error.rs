//! Error types for the overlay registry

use std::path::PathBuf;
use thiserror::Error;

/// Result type for overlay registry operations
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Overlay registry error types
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The named overlay package is not in the registry
    #[error("Overlay package not found: {0}")]
    PackageNotFound(String),

    /// The named package belongs to a different category than requested
    #[error("Overlay package {package} is in category {actual}, not {expected}")]
    CategoryMismatch {
        package: String,
        expected: String,
        actual: String,
    },

    /// A category key failed to parse
    #[error("Unknown overlay category: {0}")]
    UnknownCategory(String),

    /// The backend refused the mutation
    #[error("Overlay operation rejected: {0}")]
    OperationRejected(String),

    /// Registry state file parsing failed
    #[error("Failed to parse {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OverlayError {
    /// Create a category mismatch error
    pub fn category_mismatch(
        package: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        OverlayError::CategoryMismatch {
            package: package.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(path: PathBuf, message: impl Into<String>) -> Self {
        OverlayError::ParseError {
            path,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        OverlayError::Internal(message.into())
    }
}
