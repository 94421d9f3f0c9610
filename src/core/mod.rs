//! Core types for the Filterer image processing system.
//!
//! This module contains:
//! - Pixel data (`Pixel`, `PixelBuffer`) and filter settings
//! - Error types
//! - Processor configuration

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{PresetDefinition, ProcessorConfig};
pub use error::{FilterIssue, FiltererError, FiltererResult};
pub use types::{FilterSetting, Pixel, PixelBuffer};
