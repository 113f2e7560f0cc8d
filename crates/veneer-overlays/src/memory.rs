//! In-memory overlay registry
//!
//! Backs tests and ephemeral sessions, and serves as the overlay table
//! behind the persistent registry. Mutations are recorded in an operation
//! log so tests can assert on exactly which calls a caller issued.

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, Ordering},
        RwLock,
    },
};

use tracing::debug;

use crate::{
    error::{OverlayError, OverlayResult},
    manager::OverlayManager,
    types::{OverlayCategory, OverlayInfo},
};

/// One recorded registry mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayOp {
    /// A `disable_overlay` call, with the package it named
    Disable(String),
    /// An `enable_exclusive_in_category` call, with its category and package
    EnableExclusive(OverlayCategory, String),
}

/// In-memory overlay registry
#[derive(Debug, Default)]
pub struct MemoryOverlayManager {
    overlays: RwLock<HashMap<String, OverlayInfo>>,
    ops: RwLock<Vec<OverlayOp>>,
    fail_next: AtomicBool,
}

impl MemoryOverlayManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with overlay records
    pub fn from_seed(overlays: impl IntoIterator<Item = OverlayInfo>) -> Self {
        let table: HashMap<String, OverlayInfo> = overlays
            .into_iter()
            .map(|info| (info.package.clone(), info))
            .collect();
        Self {
            overlays: RwLock::new(table),
            ops: RwLock::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    /// Install an overlay record into the registry
    pub fn add_overlay(
        &self,
        package: impl Into<String>,
        target_package: impl Into<String>,
        category: OverlayCategory,
        enabled: bool,
        priority: i32,
    ) -> OverlayResult<()> {
        let info = OverlayInfo::new(package, target_package, category, enabled, priority);
        let mut table = self.lock_table_mut()?;
        table.insert(info.package.clone(), info);
        Ok(())
    }

    /// Remove every overlay record
    pub fn clear_overlays(&self) -> OverlayResult<()> {
        self.lock_table_mut()?.clear();
        Ok(())
    }

    /// Look up one overlay record
    pub fn overlay(&self, package: &str) -> Option<OverlayInfo> {
        self.overlays
            .read()
            .ok()
            .and_then(|table| table.get(package).cloned())
    }

    /// Number of overlays currently enabled across all targets
    pub fn enabled_count(&self) -> usize {
        self.overlays
            .read()
            .map(|table| table.values().filter(|o| o.enabled).count())
            .unwrap_or(0)
    }

    /// Every mutation issued through this registry, in call order
    pub fn recorded_ops(&self) -> Vec<OverlayOp> {
        self.ops.read().map(|ops| ops.clone()).unwrap_or_default()
    }

    /// Number of recorded `disable_overlay` calls
    pub fn disable_count(&self) -> usize {
        self.recorded_ops()
            .iter()
            .filter(|op| matches!(op, OverlayOp::Disable(_)))
            .count()
    }

    /// Number of recorded `enable_exclusive_in_category` calls
    pub fn exclusive_enable_count(&self) -> usize {
        self.recorded_ops()
            .iter()
            .filter(|op| matches!(op, OverlayOp::EnableExclusive(_, _)))
            .count()
    }

    /// Make the next mutation fail with `OperationRejected`
    ///
    /// One-shot: the failure arms once and clears when it fires.
    pub fn fail_next_operation(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// A sorted snapshot of every overlay record
    pub fn snapshot(&self) -> OverlayResult<Vec<OverlayInfo>> {
        let table = self.lock_table()?;
        let mut records: Vec<OverlayInfo> = table.values().cloned().collect();
        records.sort_by(|a, b| a.package.cmp(&b.package));
        Ok(records)
    }

    fn lock_table(
        &self,
    ) -> OverlayResult<std::sync::RwLockReadGuard<'_, HashMap<String, OverlayInfo>>> {
        self.overlays
            .read()
            .map_err(|e| OverlayError::internal(format!("Failed to lock overlay table: {}", e)))
    }

    fn lock_table_mut(
        &self,
    ) -> OverlayResult<std::sync::RwLockWriteGuard<'_, HashMap<String, OverlayInfo>>> {
        self.overlays
            .write()
            .map_err(|e| OverlayError::internal(format!("Failed to lock overlay table: {}", e)))
    }

    fn record_op(&self, op: OverlayOp) {
        if let Ok(mut ops) = self.ops.write() {
            ops.push(op);
        }
    }

    fn check_injected_failure(&self) -> OverlayResult<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(OverlayError::OperationRejected(
                "injected registry failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl OverlayManager for MemoryOverlayManager {
    fn disable_overlay(&self, package: &str) -> OverlayResult<()> {
        self.check_injected_failure()?;
        let mut table = self.lock_table_mut()?;
        let info = table
            .get_mut(package)
            .ok_or_else(|| OverlayError::PackageNotFound(package.to_string()))?;
        info.enabled = false;
        drop(table);

        self.record_op(OverlayOp::Disable(package.to_string()));
        debug!("Disabled overlay {}", package);
        Ok(())
    }

    fn enable_exclusive_in_category(
        &self,
        category: OverlayCategory,
        package: &str,
    ) -> OverlayResult<()> {
        self.check_injected_failure()?;
        let mut table = self.lock_table_mut()?;
        let info = table
            .get(package)
            .ok_or_else(|| OverlayError::PackageNotFound(package.to_string()))?;
        if info.category != category {
            return Err(OverlayError::category_mismatch(
                package,
                category.as_str(),
                info.category.as_str(),
            ));
        }
        let target = info.target_package.clone();

        // One logical step: the named package comes up, every competitor in
        // the same (target, category) slot goes down.
        for record in table.values_mut() {
            if record.target_package == target && record.category == category {
                record.enabled = record.package == package;
            }
        }
        drop(table);

        self.record_op(OverlayOp::EnableExclusive(category, package.to_string()));
        debug!("Enabled overlay {} exclusively in {}", package, category);
        Ok(())
    }

    fn enabled_overlays_for_target(
        &self,
        target_package: &str,
    ) -> OverlayResult<BTreeMap<OverlayCategory, String>> {
        let table = self.lock_table()?;
        let mut winners: BTreeMap<OverlayCategory, &OverlayInfo> = BTreeMap::new();
        for info in table.values() {
            if !info.enabled || info.target_package != target_package {
                continue;
            }
            match winners.get(&info.category) {
                Some(&current) if !info.wins_slot_over(current) => {}
                _ => {
                    winners.insert(info.category, info);
                }
            }
        }
        Ok(winners
            .into_iter()
            .map(|(category, info)| (category, info.package.clone()))
            .collect())
    }
}
