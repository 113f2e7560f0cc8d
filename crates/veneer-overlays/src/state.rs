//! Persistent overlay registry
//!
//! Keeps the overlay table in a JSON state file so enablement survives
//! restarts. Every successful mutation persists a fresh snapshot through a
//! temp-file-then-rename write.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::{OverlayError, OverlayResult},
    manager::OverlayManager,
    memory::MemoryOverlayManager,
    types::{OverlayCategory, OverlayInfo},
};

/// Overlay registry backed by a JSON state file
#[derive(Debug)]
pub struct StateOverlayManager {
    inner: MemoryOverlayManager,
    path: PathBuf,
}

impl StateOverlayManager {
    /// Open (or create) the registry at the default location, `~/.veneer/overlays.json`
    pub fn open_default() -> OverlayResult<Self> {
        let mut dir = dirs::home_dir()
            .ok_or_else(|| OverlayError::internal("Home directory not found"))?;
        dir.push(".veneer");
        fs::create_dir_all(&dir)?;
        Self::open(dir.join("overlays.json"))
    }

    /// Open (or create) the registry at an explicit path
    pub fn open(path: impl Into<PathBuf>) -> OverlayResult<Self> {
        let path = path.into();
        let records = Self::load(&path)?;
        let count = records.len();
        let manager = Self {
            inner: MemoryOverlayManager::from_seed(records),
            path,
        };
        info!(
            "Opened overlay registry at {} with {} packages",
            manager.path.display(),
            count
        );
        Ok(manager)
    }

    /// Path of the backing state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Install an overlay record and persist the table
    pub fn register_overlay(&self, info: OverlayInfo) -> OverlayResult<()> {
        self.inner.add_overlay(
            info.package.clone(),
            info.target_package.clone(),
            info.category,
            info.enabled,
            info.priority,
        )?;
        self.persist()
    }

    /// Look up one overlay record
    pub fn overlay(&self, package: &str) -> Option<OverlayInfo> {
        self.inner.overlay(package)
    }

    fn load(path: &Path) -> OverlayResult<Vec<OverlayInfo>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            OverlayError::parse_error(
                path.to_path_buf(),
                format!("Failed to parse overlay state: {}", e),
            )
        })
    }

    fn persist(&self) -> OverlayResult<()> {
        let snapshot = self.inner.snapshot()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&snapshot).map_err(|e| {
            OverlayError::parse_error(self.path.clone(), format!("Serialization failed: {}", e))
        })?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("Overlay state saved to {}", self.path.display());
        Ok(())
    }
}

impl OverlayManager for StateOverlayManager {
    fn disable_overlay(&self, package: &str) -> OverlayResult<()> {
        self.inner.disable_overlay(package)?;
        self.persist()
    }

    fn enable_exclusive_in_category(
        &self,
        category: OverlayCategory,
        package: &str,
    ) -> OverlayResult<()> {
        self.inner.enable_exclusive_in_category(category, package)?;
        self.persist()
    }

    fn enabled_overlays_for_target(
        &self,
        target_package: &str,
    ) -> OverlayResult<BTreeMap<OverlayCategory, String>> {
        self.inner.enabled_overlays_for_target(target_package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::targets;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let manager = StateOverlayManager::open(dir.path().join("overlays.json")).unwrap();
        assert!(manager
            .enabled_overlays_for_target(targets::PLATFORM_PACKAGE)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_enablement_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overlays.json");

        let manager = StateOverlayManager::open(&path).unwrap();
        manager
            .register_overlay(OverlayInfo::new(
                "pack.color.a",
                targets::PLATFORM_PACKAGE,
                OverlayCategory::Color,
                false,
                0,
            ))
            .unwrap();
        manager
            .enable_exclusive_in_category(OverlayCategory::Color, "pack.color.a")
            .unwrap();
        drop(manager);

        let reopened = StateOverlayManager::open(&path).unwrap();
        let enabled = reopened
            .enabled_overlays_for_target(targets::PLATFORM_PACKAGE)
            .unwrap();
        assert_eq!(enabled.get(&OverlayCategory::Color).unwrap(), "pack.color.a");
    }

    #[test]
    fn test_exclusivity_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overlays.json");

        let manager = StateOverlayManager::open(&path).unwrap();
        for package in ["pack.color.a", "pack.color.b"] {
            manager
                .register_overlay(OverlayInfo::new(
                    package,
                    targets::PLATFORM_PACKAGE,
                    OverlayCategory::Color,
                    false,
                    0,
                ))
                .unwrap();
        }
        manager
            .enable_exclusive_in_category(OverlayCategory::Color, "pack.color.a")
            .unwrap();
        manager
            .enable_exclusive_in_category(OverlayCategory::Color, "pack.color.b")
            .unwrap();
        drop(manager);

        let reopened = StateOverlayManager::open(&path).unwrap();
        assert!(!reopened.overlay("pack.color.a").unwrap().enabled);
        assert!(reopened.overlay("pack.color.b").unwrap().enabled);
    }

    #[test]
    fn test_corrupt_state_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("overlays.json");
        fs::write(&path, "[not json").unwrap();

        let err = StateOverlayManager::open(&path).unwrap_err();
        assert!(matches!(err, OverlayError::ParseError { .. }));
    }
}
