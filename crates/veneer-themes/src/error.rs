//! Error types for theme application

use thiserror::Error;
use veneer_overlays::OverlayError;
use veneer_storage::StorageError;

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Theme application error types
///
/// Both failure classes a theme apply can hit are carried with their cause
/// intact, so callers receiving the error callback can inspect what the
/// registry or the settings store actually reported.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// An overlay registry mutation or query failed
    #[error("Overlay registry error: {0}")]
    Overlay(#[from] OverlayError),

    /// The settings store write or read failed
    #[error("Settings store error: {0}")]
    Settings(#[from] StorageError),

    /// A persisted applied-theme record failed to parse
    #[error("Invalid applied-theme record: {0}")]
    Parse(String),
}
