//! File-backed settings store
//!
//! Persists the key/value map as a single JSON file. Writes go through a
//! temp-file-then-rename sequence so a crash mid-write never leaves a
//! truncated settings file behind.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{StorageError, StorageResult},
    store::SettingsStore,
};

/// On-disk settings envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
struct SettingsFile {
    /// Stored key/value pairs
    values: BTreeMap<String, String>,
    /// Last updated timestamp in RFC3339 format
    last_updated: Option<String>,
}

/// Settings store persisted to a JSON file
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    state: RwLock<SettingsFile>,
}

impl FileSettingsStore {
    /// Open (or create) the store at the default location, `~/.veneer/settings.json`
    pub fn open_default() -> StorageResult<Self> {
        let mut dir = dirs::home_dir().ok_or_else(|| {
            StorageError::path_resolution_error("Home directory not found")
        })?;
        dir.push(".veneer");
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::directory_creation_failed(dir.clone(), e))?;
        Self::open(dir.join("settings.json"))
    }

    /// Open (or create) the store at an explicit path
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let state = Self::load(&path)?;
        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StorageResult<SettingsFile> {
        if !path.exists() {
            return Ok(SettingsFile::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            StorageError::parse_error(
                path.to_path_buf(),
                "json",
                format!("Failed to parse settings file: {}", e),
            )
        })
    }

    /// Write the snapshot to a temp file, then rename over the target
    fn save(&self, state: &SettingsFile) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StorageError::directory_creation_failed(parent.to_path_buf(), e))?;
        }
        let content = serde_json::to_string_pretty(state).map_err(|e| {
            StorageError::parse_error(
                self.path.clone(),
                "json",
                format!("Serialization failed: {}", e),
            )
        })?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let state = self
            .state
            .read()
            .map_err(|e| StorageError::internal(format!("Failed to lock settings: {}", e)))?;
        Ok(state.values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|e| StorageError::internal(format!("Failed to lock settings: {}", e)))?;
        state.values.insert(key.to_string(), value.to_string());
        state.last_updated = Some(chrono::Local::now().to_rfc3339());
        self.save(&state)
    }
}
