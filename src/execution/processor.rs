//! The image processor.
//!
//! [`ImageProcessor`] owns the preset and adjustable registries and applies
//! filters from them to a caller-owned [`PixelBuffer`], in place.

use crate::core::config::ProcessorConfig;
use crate::core::error::{FilterIssue, FiltererError};
use crate::core::types::{FilterSetting, PixelBuffer};
use crate::execution::report::{AppliedFilter, ApplyReport, DiagnosticCallback};
use crate::filters::builtin::color::Filter;
use crate::filters::registry::{AdjustableRegistry, PresetRegistry, RegistryKind};
use parking_lot::RwLock;
use std::sync::Arc;

/// Applies registry filters to pixel buffers.
///
/// Lookups never fail hard: an unknown name is logged, reported in the
/// returned [`ApplyReport`] and skipped, and the rest of a batch still runs.
pub struct ImageProcessor {
    presets: PresetRegistry,
    adjustable: AdjustableRegistry,
    config: ProcessorConfig,
    diagnostics: Option<DiagnosticCallback>,
}

impl std::fmt::Debug for ImageProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageProcessor")
            .field("presets", &self.presets)
            .field("adjustable", &self.adjustable)
            .field("config", &self.config)
            .field("diagnostics", &self.diagnostics.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl ImageProcessor {
    /// Create a processor with the builtin registries and default config.
    pub fn new() -> Self {
        Self {
            presets: PresetRegistry::with_builtins(),
            adjustable: AdjustableRegistry::with_builtins(),
            config: ProcessorConfig::default(),
            diagnostics: None,
        }
    }

    /// Create a processor from a configuration.
    ///
    /// Custom presets are registered after the builtins and replace any
    /// builtin of the same name.
    pub fn with_config(config: ProcessorConfig) -> Result<Self, FiltererError> {
        config.validate()?;

        let mut presets = if config.include_builtin_presets {
            PresetRegistry::with_builtins()
        } else {
            PresetRegistry::new()
        };

        for preset in &config.presets {
            if presets.register_entry(preset.name.clone(), preset.to_entry()).is_some() {
                log::debug!("Preset {} replaces a builtin preset", preset.name);
            }
        }

        Ok(Self {
            presets,
            adjustable: AdjustableRegistry::with_builtins(),
            config,
            diagnostics: None,
        })
    }

    /// Install a callback that receives every non-fatal issue.
    pub fn with_diagnostics<F>(mut self, callback: F) -> Self
    where
        F: Fn(&FilterIssue) + Send + Sync + 'static,
    {
        self.diagnostics = Some(Arc::new(callback));
        self
    }

    /// The preset registry.
    pub fn presets(&self) -> &PresetRegistry {
        &self.presets
    }

    /// The preset registry, for adding or removing presets.
    pub fn presets_mut(&mut self) -> &mut PresetRegistry {
        &mut self.presets
    }

    /// The adjustable registry.
    pub fn adjustable(&self) -> &AdjustableRegistry {
        &self.adjustable
    }

    /// The adjustable registry, for adding or removing filters.
    pub fn adjustable_mut(&mut self) -> &mut AdjustableRegistry {
        &mut self.adjustable
    }

    /// The active configuration.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    // ========================================================================
    // Application
    // ========================================================================

    /// Apply one preset, with its baked-in factor.
    pub fn apply_filter(&self, buffer: &mut PixelBuffer, name: &str) -> ApplyReport {
        let mut report = ApplyReport::new();
        self.apply_preset(buffer, name, &mut report);
        report
    }

    /// Apply presets in list order, each on the output of the previous one.
    ///
    /// An empty list leaves the buffer untouched.
    pub fn apply_filters<S: AsRef<str>>(&self, buffer: &mut PixelBuffer, names: &[S]) -> ApplyReport {
        let mut report = ApplyReport::new();

        if names.is_empty() {
            self.report_issue(
                &mut report,
                FilterIssue::EmptyInput {
                    registry: RegistryKind::Preset,
                },
            );
            return report;
        }

        for name in names {
            self.apply_preset(buffer, name.as_ref(), &mut report);
        }
        report
    }

    /// Apply adjustable filters in list order, each with its own factor.
    ///
    /// The factor applies to that one step; the registered default does not
    /// change. An empty list leaves the buffer untouched.
    pub fn apply_settings(&self, buffer: &mut PixelBuffer, settings: &[FilterSetting]) -> ApplyReport {
        let mut report = ApplyReport::new();

        if settings.is_empty() {
            self.report_issue(
                &mut report,
                FilterIssue::EmptyInput {
                    registry: RegistryKind::Adjustable,
                },
            );
            return report;
        }

        for setting in settings {
            match self.adjustable.get(&setting.name) {
                Some(filter) => self.run(
                    buffer,
                    &setting.name,
                    RegistryKind::Adjustable,
                    *filter,
                    Some(setting.factor),
                    &mut report,
                ),
                None => self.report_unknown(&mut report, &setting.name, RegistryKind::Adjustable),
            }
        }
        report
    }

    /// Apply settings to a copy of `buffer`, leaving the original untouched.
    pub fn preview_settings(
        &self,
        buffer: &PixelBuffer,
        settings: &[FilterSetting],
    ) -> (PixelBuffer, ApplyReport) {
        let mut preview = buffer.clone();
        let report = self.apply_settings(&mut preview, settings);
        (preview, report)
    }

    /// Apply presets to a copy of `buffer`, leaving the original untouched.
    pub fn preview_filters<S: AsRef<str>>(
        &self,
        buffer: &PixelBuffer,
        names: &[S],
    ) -> (PixelBuffer, ApplyReport) {
        let mut preview = buffer.clone();
        let report = self.apply_filters(&mut preview, names);
        (preview, report)
    }

    fn apply_preset(&self, buffer: &mut PixelBuffer, name: &str, report: &mut ApplyReport) {
        match self.presets.get(name) {
            Some(filter) => self.run(buffer, name, RegistryKind::Preset, *filter, None, report),
            None => self.report_unknown(report, name, RegistryKind::Preset),
        }
    }

    fn run(
        &self,
        buffer: &mut PixelBuffer,
        name: &str,
        registry: RegistryKind,
        filter: Filter,
        factor: Option<i32>,
        report: &mut ApplyReport,
    ) {
        let effective = filter.kind().with_factor(factor.unwrap_or_else(|| filter.factor()));
        let execution = self.config.execution_for(buffer.len());
        log::debug!(
            "Applying {} as {} to {}x{} buffer ({:?})",
            name,
            effective,
            buffer.width(),
            buffer.height(),
            execution
        );

        filter.apply_with(buffer, factor, execution);

        report.record_applied(AppliedFilter {
            name: name.to_string(),
            registry,
            filter: effective,
        });
    }

    fn report_unknown(&self, report: &mut ApplyReport, name: &str, registry: RegistryKind) {
        self.report_issue(
            report,
            FilterIssue::UnknownFilterName {
                name: name.to_string(),
                registry,
            },
        );
    }

    fn report_issue(&self, report: &mut ApplyReport, issue: FilterIssue) {
        log::warn!("{}", issue);
        if let Some(callback) = &self.diagnostics {
            callback(&issue);
        }
        report.record_issue(issue);
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Processor shared across threads, with single-writer registry edits.
pub type SharedProcessor = Arc<RwLock<ImageProcessor>>;

/// Wrap a processor for sharing.
pub fn new_shared_processor(processor: ImageProcessor) -> SharedProcessor {
    Arc::new(RwLock::new(processor))
}
