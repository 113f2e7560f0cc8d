//! Veneer Theme Application
//!
//! This crate provides theme descriptors (one overlay package selection per
//! visual category), their serialized applied-state encoding, and the
//! coordinator that drives the overlay registry and settings store so that
//! exactly the requested overlays are active.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{Result, ThemeError};
pub use manager::{ThemeManager, THEME_SETTING};
pub use types::{ThemeBuilder, ThemeDescriptor};
