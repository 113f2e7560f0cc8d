//! Overlay registry trait

use std::collections::BTreeMap;

use crate::{error::OverlayResult, types::OverlayCategory};

/// Trait for the overlay-enablement registry
///
/// The registry is the authoritative source of which overlay packages exist,
/// which (target, category) slot each belongs to, and which are enabled. It
/// is responsible for:
/// 1. Disabling individual overlays on request
/// 2. Enabling one overlay exclusively within its (target, category) slot,
///    disabling every competitor in the same atomic step
/// 3. Answering which overlay is enabled per category for a target package
///
/// All per-package exclusivity bookkeeping lives behind this trait; callers
/// never track competing packages themselves.
///
/// Implementations must uphold: after any mutation, at most one overlay is
/// enabled per (target, category) pair.
pub trait OverlayManager: Send + Sync {
    /// Disable a single overlay package
    ///
    /// Unknown packages are an error; disabling an already-disabled overlay
    /// is not.
    fn disable_overlay(&self, package: &str) -> OverlayResult<()>;

    /// Enable `package` and disable every other overlay sharing its
    /// (target, category) slot, in one logical step
    ///
    /// The package must exist and belong to `category`.
    fn enable_exclusive_in_category(
        &self,
        category: OverlayCategory,
        package: &str,
    ) -> OverlayResult<()>;

    /// The currently enabled overlay per category for one target package
    fn enabled_overlays_for_target(
        &self,
        target_package: &str,
    ) -> OverlayResult<BTreeMap<OverlayCategory, String>>;
}
