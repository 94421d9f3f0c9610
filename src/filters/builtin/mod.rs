//! Built-in filter implementations.
//!
//! This module contains the color filters and the registry contents that
//! ship with Filterer.

pub mod color;

use crate::filters::registry::{AdjustableRegistry, PresetRegistry, RegistryEntry};

pub use color::{Execution, Filter, FilterKind};

/// Builtin presets: `(name, filter, description)`.
pub const BUILTIN_PRESETS: [(&str, Filter, &str); 5] = [
    ("+55Brightness", Filter::Brightness(55), "Brighten every channel by 55"),
    ("-40Brightness", Filter::Brightness(-40), "Darken every channel by 40"),
    ("3xContrast", Filter::Contrast(3), "Triple the contrast around mid-gray"),
    ("Sepia", Filter::Sepia(1), "Classic sepia tone"),
    ("Grayscale", Filter::Grayscale(1), "Plain grayscale"),
];

/// Register the builtin presets.
pub fn register_presets(registry: &mut PresetRegistry) {
    for (name, filter, description) in BUILTIN_PRESETS {
        registry.register_entry(name, RegistryEntry::new(name, filter).with_description(description));
    }
}

/// Register every filter kind at its default factor, keyed by kind name.
pub fn register_adjustable(registry: &mut AdjustableRegistry) {
    for kind in FilterKind::ALL {
        registry.register(kind.name(), kind.with_default_factor());
    }
}
