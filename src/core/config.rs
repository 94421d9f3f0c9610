//! Processor configuration.
//!
//! Configuration is usually built in code with the `with_*` methods, or read
//! from a TOML file:
//!
//! ```toml
//! parallel = true
//! parallel_threshold = 262144
//!
//! [[presets]]
//! name = "Warm"
//! kind = "Sepia"
//! factor = 2
//! description = "Strong sepia"
//! ```

use crate::core::error::FiltererError;
use crate::filters::builtin::color::{Execution, Filter, FilterKind};
use crate::filters::registry::RegistryEntry;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pixel count at which parallel execution kicks in (512 x 512).
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512 * 512;

/// A user-defined preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetDefinition {
    /// Registry key.
    pub name: String,
    /// Filter kind.
    pub kind: FilterKind,
    /// Baked-in factor. Defaults to the kind's default factor.
    #[serde(default)]
    pub factor: Option<i32>,
    /// Listing description.
    #[serde(default)]
    pub description: Option<String>,
}

impl PresetDefinition {
    /// Create a preset definition.
    pub fn new(name: impl Into<String>, kind: FilterKind, factor: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            factor: Some(factor),
            description: None,
        }
    }

    /// The filter this preset resolves to.
    pub fn filter(&self) -> Filter {
        self.kind
            .with_factor(self.factor.unwrap_or_else(|| self.kind.default_factor()))
    }

    /// Registry entry for this preset.
    pub fn to_entry(&self) -> RegistryEntry {
        let entry = RegistryEntry::new(self.name.clone(), self.filter());
        match &self.description {
            Some(description) => entry.with_description(description.clone()),
            None => entry,
        }
    }
}

/// Configuration for an [`ImageProcessor`](crate::execution::processor::ImageProcessor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Split large buffers across the rayon pool.
    pub parallel: bool,
    /// Minimum pixel count before `parallel` takes effect.
    pub parallel_threshold: usize,
    /// Start the preset registry from the builtin presets.
    pub include_builtin_presets: bool,
    /// Extra presets, registered after the builtins.
    pub presets: Vec<PresetDefinition>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            include_builtin_presets: true,
            presets: Vec::new(),
        }
    }
}

impl ProcessorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the parallel threshold in pixels.
    pub fn with_parallel_threshold(mut self, pixels: usize) -> Self {
        self.parallel_threshold = pixels;
        self
    }

    /// Include or exclude the builtin presets.
    pub fn with_builtin_presets(mut self, include: bool) -> Self {
        self.include_builtin_presets = include;
        self
    }

    /// Add a preset.
    pub fn with_preset(mut self, preset: PresetDefinition) -> Self {
        self.presets.push(preset);
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, FiltererError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FiltererError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded config from {} ({} custom preset(s))",
            path.display(),
            config.presets.len()
        );
        Ok(config)
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), FiltererError> {
        if let Some(preset) = self.presets.iter().find(|p| p.name.trim().is_empty()) {
            return Err(FiltererError::InvalidConfig(format!(
                "preset of kind {} has an empty name",
                preset.kind
            )));
        }
        Ok(())
    }

    /// Execution strategy for a buffer of `pixels` pixels.
    pub fn execution_for(&self, pixels: usize) -> Execution {
        if self.parallel && pixels >= self.parallel_threshold {
            Execution::Parallel
        } else {
            Execution::Sequential
        }
    }
}
