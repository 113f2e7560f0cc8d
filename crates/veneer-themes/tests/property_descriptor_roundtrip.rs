//! Property-based tests for the serialized-packages encoding
//!
//! For any set of selections, the encoding must round-trip exactly, and an
//! apply must leave the persisted record equal to the descriptor's own
//! encoding.

use std::sync::Arc;

use proptest::prelude::*;
use veneer_overlays::{MemoryOverlayManager, OverlayCategory};
use veneer_storage::{MemorySettingsStore, SettingsStore};
use veneer_themes::{ThemeBuilder, ThemeDescriptor, ThemeManager, THEME_SETTING};

/// Strategy for one overlay package identifier
fn package_strategy() -> impl Strategy<Value = String> {
    "pack\\.[a-z]{1,12}(\\.[a-z]{1,12}){0,2}"
}

/// Strategy for a selection set: any subset of categories, each with a package
fn selections_strategy() -> impl Strategy<Value = Vec<(OverlayCategory, String)>> {
    let entry = prop_oneof![
        Just(OverlayCategory::Color),
        Just(OverlayCategory::Font),
        Just(OverlayCategory::Shape),
        Just(OverlayCategory::IconPlatform),
        Just(OverlayCategory::IconSettings),
        Just(OverlayCategory::IconShell),
    ]
    .prop_flat_map(|category| package_strategy().prop_map(move |p| (category, p)));
    prop::collection::vec(entry, 0..6)
}

fn build(selections: &[(OverlayCategory, String)]) -> ThemeDescriptor {
    let mut builder = ThemeBuilder::new();
    for (category, package) in selections {
        builder = builder.with_overlay(*category, package.clone());
    }
    builder.build()
}

proptest! {
    #[test]
    fn prop_serialized_packages_roundtrip(selections in selections_strategy()) {
        let descriptor = build(&selections);
        let parsed = ThemeDescriptor::from_serialized(&descriptor.serialized_packages()).unwrap();
        prop_assert_eq!(parsed, descriptor);
    }

    #[test]
    fn prop_serialization_is_empty_iff_default(selections in selections_strategy()) {
        let descriptor = build(&selections);
        prop_assert_eq!(
            descriptor.serialized_packages().is_empty(),
            descriptor.is_default()
        );
    }

    #[test]
    fn prop_apply_persists_the_descriptors_own_encoding(selections in selections_strategy()) {
        let overlays = Arc::new(MemoryOverlayManager::new());
        let descriptor = build(&selections);
        for (category, package) in descriptor.selections() {
            overlays
                .add_overlay(package, category.target_package(), category, false, 0)
                .unwrap();
        }

        let settings = Arc::new(MemorySettingsStore::new());
        let manager = ThemeManager::new(overlays, settings.clone());
        tokio_test::block_on(manager.apply_async(descriptor.clone())).unwrap();

        prop_assert_eq!(
            settings.get(THEME_SETTING).unwrap(),
            Some(descriptor.serialized_packages())
        );
        prop_assert_eq!(manager.applied_theme().unwrap(), descriptor);
    }
}
