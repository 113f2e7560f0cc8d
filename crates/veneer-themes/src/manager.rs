//! Theme application coordinator

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use veneer_overlays::{targets, OverlayManager};
use veneer_storage::SettingsStore;

use crate::{error::Result, types::ThemeDescriptor};

/// Settings key holding the serialized record of the applied theme
pub const THEME_SETTING: &str = "applied_overlay_packages";

/// Coordinator that drives the overlay registry to match a theme descriptor
///
/// An apply walks three steps in order: registry mutations, then the
/// settings write, then completion. Applies issued through one manager are
/// serialized by an internal lock; the registry and the settings key are
/// shared mutable state, so interleaved applies would race each other.
#[derive(Clone)]
pub struct ThemeManager {
    overlays: Arc<dyn OverlayManager>,
    settings: Arc<dyn SettingsStore>,
    apply_lock: Arc<Mutex<()>>,
}

impl ThemeManager {
    /// Create a coordinator over an overlay registry and a settings store
    pub fn new(overlays: Arc<dyn OverlayManager>, settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            overlays,
            settings,
            apply_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Apply a theme descriptor, completing through `on_complete`
    ///
    /// The work runs on a spawned task, so completion is asynchronous and
    /// may fire on a different execution context than the call site. The
    /// callback consumes a single `Result`: it fires exactly once, with
    /// `Ok(())` or the first failing step's cause, never both. Mutations
    /// already issued before a failure stay applied; there is no rollback.
    ///
    /// Must be called from within a tokio runtime.
    pub fn apply<F>(&self, descriptor: ThemeDescriptor, on_complete: F)
    where
        F: FnOnce(Result<()>) + Send + 'static,
    {
        let manager = self.clone();
        tokio::spawn(async move {
            let result = manager.apply_async(descriptor).await;
            if let Err(ref e) = result {
                warn!("Theme apply failed: {}", e);
            }
            on_complete(result);
        });
    }

    /// Awaitable form of [`ThemeManager::apply`]
    pub async fn apply_async(&self, descriptor: ThemeDescriptor) -> Result<()> {
        let _guard = self.apply_lock.lock().await;

        if descriptor.is_default() {
            info!("Applying default theme, disabling all overlays");
            self.disable_all_overlays()?;
        } else {
            info!("Applying theme with {} selections", descriptor.len());
            for (category, package) in descriptor.selections() {
                debug!("Enabling {} exclusively in {}", package, category);
                self.overlays
                    .enable_exclusive_in_category(category, package)?;
            }
        }

        // Registry state is settled; record it before reporting completion.
        self.settings
            .put(THEME_SETTING, &descriptor.serialized_packages())?;
        Ok(())
    }

    /// Reconstruct the applied theme from the persisted record
    ///
    /// An absent or empty record reads as the default theme.
    pub fn applied_theme(&self) -> Result<ThemeDescriptor> {
        let stored = self.settings.get(THEME_SETTING)?.unwrap_or_default();
        ThemeDescriptor::from_serialized(&stored)
    }

    /// One disable call per overlay currently enabled on any target
    fn disable_all_overlays(&self) -> Result<()> {
        for target in targets::TARGET_PACKAGES {
            let enabled = self.overlays.enabled_overlays_for_target(target)?;
            for (category, package) in enabled {
                debug!("Disabling {} ({} on {})", package, category, target);
                self.overlays.disable_overlay(&package)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager").finish_non_exhaustive()
    }
}
