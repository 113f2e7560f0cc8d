//! Veneer Settings Persistence
//!
//! This crate provides the durable string-keyed settings store the rest of
//! Veneer writes applied-state records into, with a file-backed
//! implementation for real use and an in-memory one for tests.

pub mod error;
pub mod file;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::FileSettingsStore;
pub use store::{MemorySettingsStore, SettingsStore};
