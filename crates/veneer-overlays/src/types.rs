//! Overlay package model types

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Well-known target package identifiers
pub mod targets {
    /// The platform package (colors, fonts, shapes, platform icons)
    pub const PLATFORM_PACKAGE: &str = "system.platform";
    /// The settings application package
    pub const SETTINGS_PACKAGE: &str = "system.settings";
    /// The system shell package
    pub const SHELL_PACKAGE: &str = "system.shell";

    /// All target packages the registry tracks
    pub const TARGET_PACKAGES: [&str; 3] = [PLATFORM_PACKAGE, SETTINGS_PACKAGE, SHELL_PACKAGE];
}

/// A dimension of visual customization
///
/// Each category admits at most one active overlay per target package. The
/// declaration order here is the canonical ordering used wherever categories
/// are serialized or listed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OverlayCategory {
    /// Accent color palette for the platform
    #[serde(rename = "color")]
    Color,
    /// System font family
    #[serde(rename = "font")]
    Font,
    /// Corner/shape treatment for platform widgets
    #[serde(rename = "shape")]
    Shape,
    /// Icon pack applied to the platform package
    #[serde(rename = "icon.platform")]
    IconPlatform,
    /// Icon pack applied to the settings application
    #[serde(rename = "icon.settings")]
    IconSettings,
    /// Icon pack applied to the system shell
    #[serde(rename = "icon.shell")]
    IconShell,
}

impl OverlayCategory {
    /// All categories in canonical order
    pub const ALL: [OverlayCategory; 6] = [
        OverlayCategory::Color,
        OverlayCategory::Font,
        OverlayCategory::Shape,
        OverlayCategory::IconPlatform,
        OverlayCategory::IconSettings,
        OverlayCategory::IconShell,
    ];

    /// Stable string form, used as a serialization key
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayCategory::Color => "color",
            OverlayCategory::Font => "font",
            OverlayCategory::Shape => "shape",
            OverlayCategory::IconPlatform => "icon.platform",
            OverlayCategory::IconSettings => "icon.settings",
            OverlayCategory::IconShell => "icon.shell",
        }
    }

    /// The package whose resources overlays in this category replace
    pub fn target_package(&self) -> &'static str {
        match self {
            OverlayCategory::Color
            | OverlayCategory::Font
            | OverlayCategory::Shape
            | OverlayCategory::IconPlatform => targets::PLATFORM_PACKAGE,
            OverlayCategory::IconSettings => targets::SETTINGS_PACKAGE,
            OverlayCategory::IconShell => targets::SHELL_PACKAGE,
        }
    }
}

impl fmt::Display for OverlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayCategory {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| OverlayError::UnknownCategory(s.to_string()))
    }
}

/// One installed overlay package as the registry tracks it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayInfo {
    /// Unique package identifier
    pub package: String,
    /// Package whose resources this overlay replaces
    pub target_package: String,
    /// Customization dimension this overlay belongs to
    pub category: OverlayCategory,
    /// Whether the overlay is currently enabled
    pub enabled: bool,
    /// Order value for deterministic tie-breaking within a (target, category) slot
    pub priority: i32,
}

impl OverlayInfo {
    /// Create a new overlay record
    pub fn new(
        package: impl Into<String>,
        target_package: impl Into<String>,
        category: OverlayCategory,
        enabled: bool,
        priority: i32,
    ) -> Self {
        Self {
            package: package.into(),
            target_package: target_package.into(),
            category,
            enabled,
            priority,
        }
    }

    /// Whether this record wins a (target, category) slot over `other`
    ///
    /// Highest priority wins; the lexicographically smaller package id
    /// breaks remaining ties.
    pub fn wins_slot_over(&self, other: &OverlayInfo) -> bool {
        match self.priority.cmp(&other.priority) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => self.package < other.package,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_string_roundtrip() {
        for category in OverlayCategory::ALL {
            let parsed: OverlayCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_category_fails_to_parse() {
        let err = "wallpaper".parse::<OverlayCategory>().unwrap_err();
        assert!(matches!(err, OverlayError::UnknownCategory(_)));
    }

    #[test]
    fn test_icon_categories_target_their_apps() {
        assert_eq!(
            OverlayCategory::IconSettings.target_package(),
            targets::SETTINGS_PACKAGE
        );
        assert_eq!(
            OverlayCategory::IconShell.target_package(),
            targets::SHELL_PACKAGE
        );
        assert_eq!(
            OverlayCategory::Color.target_package(),
            targets::PLATFORM_PACKAGE
        );
    }

    #[test]
    fn test_slot_tie_break() {
        let high = OverlayInfo::new("pack.b", targets::PLATFORM_PACKAGE, OverlayCategory::Color, true, 10);
        let low = OverlayInfo::new("pack.a", targets::PLATFORM_PACKAGE, OverlayCategory::Color, true, 1);
        assert!(high.wins_slot_over(&low));
        assert!(!low.wins_slot_over(&high));

        let tied = OverlayInfo::new("pack.a", targets::PLATFORM_PACKAGE, OverlayCategory::Color, true, 10);
        assert!(tied.wins_slot_over(&high));
    }
}
