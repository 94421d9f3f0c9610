//! Name-keyed filter registries.
//!
//! There are two registries with different lookup semantics: presets carry a
//! baked-in factor that callers cannot override, while adjustable filters
//! take a factor on every call. Each is its own type
//! (`FilterRegistry<Preset>` vs `FilterRegistry<Adjustable>`) so one can never
//! be passed where the other is expected.

use crate::filters::builtin::color::Filter;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Which registry a lookup went against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Fixed-factor presets.
    Preset,
    /// Filters that take a factor per call.
    Adjustable,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Preset => f.write_str("preset"),
            RegistryKind::Adjustable => f.write_str("adjustable"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level tag for a registry.
pub trait RegistryMarker: sealed::Sealed {
    /// Runtime counterpart of the tag.
    const KIND: RegistryKind;
}

/// Tag for the preset registry.
#[derive(Debug, Clone, Copy)]
pub struct Preset;

/// Tag for the adjustable registry.
#[derive(Debug, Clone, Copy)]
pub struct Adjustable;

impl sealed::Sealed for Preset {}
impl sealed::Sealed for Adjustable {}

impl RegistryMarker for Preset {
    const KIND: RegistryKind = RegistryKind::Preset;
}

impl RegistryMarker for Adjustable {
    const KIND: RegistryKind = RegistryKind::Adjustable;
}

/// Registry entry: the filter plus what the listing shows about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The configured filter.
    pub filter: Filter,
    /// Display label.
    pub label: String,
    /// Short description.
    pub description: String,
}

impl RegistryEntry {
    /// Create an entry whose label is `label` and whose description comes
    /// from the filter kind.
    pub fn new(label: impl Into<String>, filter: Filter) -> Self {
        Self {
            filter,
            label: label.into(),
            description: filter.kind().description().to_string(),
        }
    }

    /// Replace the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Registry mapping names to filters.
///
/// Entries keep their registration order for listing; lookup is by exact
/// name.
#[derive(Debug, Clone)]
pub struct FilterRegistry<K> {
    entries: IndexMap<String, RegistryEntry>,
    _kind: PhantomData<K>,
}

/// Registry of fixed-factor presets.
pub type PresetRegistry = FilterRegistry<Preset>;

/// Registry of filters whose factor is chosen per call.
pub type AdjustableRegistry = FilterRegistry<Adjustable>;

impl<K: RegistryMarker> FilterRegistry<K> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            _kind: PhantomData,
        }
    }

    /// Which registry this is.
    pub fn kind(&self) -> RegistryKind {
        K::KIND
    }

    /// Register `filter` under `name`, labelled with the name itself.
    ///
    /// Returns the entry previously stored under `name`, if any.
    pub fn register(&mut self, name: impl Into<String>, filter: Filter) -> Option<RegistryEntry> {
        let name = name.into();
        let entry = RegistryEntry::new(name.clone(), filter);
        self.register_entry(name, entry)
    }

    /// Register a fully built entry under `name`.
    pub fn register_entry(&mut self, name: impl Into<String>, entry: RegistryEntry) -> Option<RegistryEntry> {
        self.entries.insert(name.into(), entry)
    }

    /// Look up a filter by name.
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.entries.get(name).map(|e| &e.filter)
    }

    /// Get a registry entry.
    pub fn get_entry(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Check if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    /// All entries, in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RegistryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Search names, labels and descriptions, case-insensitively.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();

        self.entries
            .iter()
            .filter(|(name, entry)| {
                name.to_lowercase().contains(&query)
                    || entry.label.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query)
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Remove a filter. Returns `true` if it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.entries.shift_remove(name).is_some()
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: RegistryMarker> Default for FilterRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetRegistry {
    /// Create a registry holding the builtin presets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::filters::builtin::register_presets(&mut registry);
        registry
    }
}

impl AdjustableRegistry {
    /// Create a registry holding every filter kind at its default factor.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::filters::builtin::register_adjustable(&mut registry);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::builtin::color::FilterKind;

    #[test]
    fn test_register_and_get() {
        let mut registry = PresetRegistry::new();
        assert!(registry.register("Warm", Filter::Sepia(2)).is_none());

        assert!(registry.contains("Warm"));
        assert_eq!(registry.get("Warm"), Some(&Filter::Sepia(2)));
        assert_eq!(registry.get_entry("Warm").unwrap().label, "Warm");
        assert_eq!(registry.get("warm"), None);
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = AdjustableRegistry::new();
        registry.register("Sepia", Filter::Sepia(1));
        let previous = registry.register("Sepia", Filter::Sepia(4));
        assert_eq!(previous.map(|e| e.filter), Some(Filter::Sepia(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(PresetRegistry::new().kind(), RegistryKind::Preset);
        assert_eq!(AdjustableRegistry::new().kind(), RegistryKind::Adjustable);
    }

    #[test]
    fn test_builtin_presets() {
        let registry = PresetRegistry::with_builtins();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            ["+55Brightness", "-40Brightness", "3xContrast", "Sepia", "Grayscale"]
        );
        assert_eq!(registry.get("-40Brightness"), Some(&Filter::Brightness(-40)));
        assert_eq!(registry.get_entry("-40Brightness").unwrap().label, "-40Brightness");
        assert_eq!(registry.get("3xContrast"), Some(&Filter::Contrast(3)));
    }

    #[test]
    fn test_builtin_adjustable() {
        let registry = AdjustableRegistry::with_builtins();
        assert_eq!(registry.len(), 4);
        for kind in FilterKind::ALL {
            assert_eq!(registry.get(kind.name()), Some(&kind.with_default_factor()));
        }
    }

    #[test]
    fn test_search() {
        let registry = PresetRegistry::with_builtins();

        let results = registry.search("bright");
        assert_eq!(results, ["+55Brightness", "-40Brightness"]);

        let results = registry.search("sepia tone");
        assert_eq!(results, ["Sepia"]);

        assert!(registry.search("nonexistent").is_empty());
    }

    #[test]
    fn test_unregister_keeps_order() {
        let mut registry = PresetRegistry::with_builtins();

        assert!(registry.unregister("3xContrast"));
        assert!(!registry.unregister("3xContrast"));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["+55Brightness", "-40Brightness", "Sepia", "Grayscale"]);
    }
}
