//! Theme descriptor types and the serialized-packages encoding

use std::collections::BTreeMap;

use veneer_overlays::OverlayCategory;

use crate::error::{Result, ThemeError};

/// An immutable request for which overlay package each category should run
///
/// A descriptor with no selections is the default descriptor: applying it
/// means "no theme", i.e. every overlay goes down. A non-default descriptor
/// names exactly one overlay package per selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeDescriptor {
    selections: BTreeMap<OverlayCategory, String>,
}

impl ThemeDescriptor {
    /// The default descriptor: no selections, disable everything
    pub fn default_theme() -> Self {
        Self::default()
    }

    /// Whether this is the default (empty) descriptor
    pub fn is_default(&self) -> bool {
        self.selections.is_empty()
    }

    /// The selected package for one category, if any
    pub fn selection(&self, category: OverlayCategory) -> Option<&str> {
        self.selections.get(&category).map(String::as_str)
    }

    /// All (category, package) selections in canonical category order
    pub fn selections(&self) -> impl Iterator<Item = (OverlayCategory, &str)> {
        self.selections
            .iter()
            .map(|(category, package)| (*category, package.as_str()))
    }

    /// Number of category selections
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Whether the descriptor has no selections
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Deterministic string encoding of the selections
    ///
    /// A JSON object keyed by the category's stable string form, in
    /// canonical category order; the default descriptor encodes as the
    /// empty string. This string is both the persisted applied-state
    /// record and the equality oracle for it.
    pub fn serialized_packages(&self) -> String {
        if self.is_default() {
            return String::new();
        }
        serde_json::to_string(&self.selections)
            .expect("category-keyed string map always serializes")
    }

    /// Parse a serialized-packages string back into a descriptor
    ///
    /// The empty string parses to the default descriptor.
    pub fn from_serialized(serialized: &str) -> Result<Self> {
        if serialized.is_empty() {
            return Ok(Self::default_theme());
        }
        let selections: BTreeMap<OverlayCategory, String> = serde_json::from_str(serialized)
            .map_err(|e| ThemeError::Parse(e.to_string()))?;
        Ok(Self { selections })
    }
}

/// Builder accumulating (category, package) selections for a descriptor
///
/// Selecting a second package for the same category replaces the first;
/// last write wins. A builder with no selections builds the default
/// descriptor.
#[derive(Debug, Clone, Default)]
pub struct ThemeBuilder {
    selections: BTreeMap<OverlayCategory, String>,
}

impl ThemeBuilder {
    /// Start an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `package` for `category`, replacing any prior selection
    pub fn with_overlay(mut self, category: OverlayCategory, package: impl Into<String>) -> Self {
        self.selections.insert(category, package.into());
        self
    }

    /// Build the immutable descriptor
    pub fn build(self) -> ThemeDescriptor {
        ThemeDescriptor {
            selections: self.selections,
        }
    }
}
