//! Error types for Filterer.
//!
//! Two layers:
//! - [`FilterIssue`]: non-fatal problems met while applying a batch. They are
//!   collected into an [`ApplyReport`](crate::execution::report::ApplyReport)
//!   and never abort the call.
//! - [`FiltererError`]: hard failures (bad buffer shape, config, I/O) returned
//!   through `Result`.

use crate::filters::registry::RegistryKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for Filterer.
#[derive(Error, Debug)]
pub enum FiltererError {
    /// A pixel vector's length disagrees with the stated dimensions.
    #[error("Pixel count {len} does not match {width}x{height}")]
    BufferSizeMismatch {
        /// Stated width.
        width: u32,
        /// Stated height.
        height: u32,
        /// Actual number of pixels supplied.
        len: usize,
    },

    /// A filter kind name that is not one of the four builtin kinds.
    #[error("Unknown filter kind '{0}'")]
    UnknownFilterKind(String),

    /// A `Name=factor` argument that could not be parsed.
    #[error("Invalid filter setting '{0}': expected <Name>=<factor>")]
    InvalidSetting(String),

    /// Configuration that parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed TOML configuration.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding or encoding failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON (de)serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Non-fatal condition reported while applying filters.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FilterIssue {
    /// A requested name has no entry in the registry; it was skipped.
    #[error("Filter {name} does not exist in the {registry} registry")]
    UnknownFilterName {
        /// The name that was looked up.
        name: String,
        /// Registry the lookup went to.
        registry: RegistryKind,
    },

    /// The batch held no names or settings; the buffer is unchanged.
    #[error("Input {registry} filter list is empty")]
    EmptyInput {
        /// Registry the batch targeted.
        registry: RegistryKind,
    },
}

impl FilterIssue {
    /// Name of the skipped filter, if this issue skipped one.
    pub fn skipped_name(&self) -> Option<&str> {
        match self {
            FilterIssue::UnknownFilterName { name, .. } => Some(name),
            FilterIssue::EmptyInput { .. } => None,
        }
    }

    /// Registry the issue was raised against.
    pub fn registry(&self) -> RegistryKind {
        match self {
            FilterIssue::UnknownFilterName { registry, .. }
            | FilterIssue::EmptyInput { registry } => *registry,
        }
    }
}

/// Result type alias for Filterer operations.
pub type FiltererResult<T> = Result<T, FiltererError>;
