//! # Filterer - Integer Color Filters
//!
//! Filterer applies brightness, contrast, grayscale and sepia filters to RGBA
//! pixel buffers, either one at a time or as an ordered sequence. Filters are
//! looked up by name in two registries:
//!
//! - **Presets**: fixed factors baked in (`"+55Brightness"`, `"3xContrast"`, ...)
//! - **Adjustable**: one entry per filter kind, with the factor chosen per call
//!
//! ## Quick Start
//!
//! ```rust
//! use filterer::prelude::*;
//!
//! let processor = ImageProcessor::new();
//! let mut buffer = PixelBuffer::filled(1, 1, Pixel::new(100, 150, 200, 255));
//!
//! // Presets use their baked-in factor.
//! let report = processor.apply_filters(&mut buffer, &["Sepia"]);
//! assert!(report.is_clean());
//! assert_eq!(buffer.pixels()[0], Pixel::new(192, 171, 133, 255));
//!
//! // Adjustable filters take a factor for each step.
//! let settings = [FilterSetting::new("Brightness", -20), FilterSetting::new("Contrast", 2)];
//! processor.apply_settings(&mut buffer, &settings);
//! ```
//!
//! Unknown names never abort a batch: they are logged through the `log`
//! facade, recorded in the returned [`ApplyReport`](execution::ApplyReport)
//! and skipped.
//!
//! ## Architecture
//!
//! - [`core`]: pixel buffers, errors and configuration
//! - [`filters`]: the color filters, registries and slider step table
//! - [`execution`]: the image processor and its reports
//! - [`io`]: loading and saving buffers as image files

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod execution;
pub mod filters;
pub mod io;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use filterer::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{FilterSetting, Pixel, PixelBuffer};

    // Configuration
    pub use crate::core::config::{PresetDefinition, ProcessorConfig};

    // Errors
    pub use crate::core::error::{FilterIssue, FiltererError, FiltererResult};

    // Filters
    pub use crate::filters::builtin::color::{Execution, Filter, FilterKind};
    pub use crate::filters::registry::{
        Adjustable, AdjustableRegistry, FilterRegistry, Preset, PresetRegistry, RegistryEntry,
        RegistryKind,
    };
    pub use crate::filters::steps::{factor_for_step, setting_for_step};

    // Execution
    pub use crate::execution::processor::{new_shared_processor, ImageProcessor, SharedProcessor};
    pub use crate::execution::report::{AppliedFilter, ApplyReport};

    // I/O
    pub use crate::io::{load_buffer, save_buffer};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
