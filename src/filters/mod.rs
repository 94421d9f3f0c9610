//! Filter module.
//!
//! Contains the filter registries, the built-in color filters and the slider
//! step table.

pub mod builtin;
pub mod registry;
pub mod steps;

pub use builtin::{Execution, Filter, FilterKind};
pub use registry::{AdjustableRegistry, FilterRegistry, PresetRegistry, RegistryKind};
