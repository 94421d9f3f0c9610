//! Execution module.
//!
//! Contains the image processor and the reports it returns.

pub mod processor;
pub mod report;

pub use processor::{new_shared_processor, ImageProcessor, SharedProcessor};
pub use report::{AppliedFilter, ApplyReport, DiagnosticCallback};
