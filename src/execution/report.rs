//! Structured results of applying filters.

use crate::core::error::FilterIssue;
use crate::filters::builtin::color::Filter;
use crate::filters::registry::RegistryKind;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Callback invoked for every non-fatal issue, in addition to logging.
pub type DiagnosticCallback = Arc<dyn Fn(&FilterIssue) + Send + Sync>;

/// One filter application that actually ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilter {
    /// Name the filter was looked up under.
    pub name: String,
    /// Registry the name was resolved in.
    pub registry: RegistryKind,
    /// The filter as run, with the factor that was used.
    pub filter: Filter,
}

/// What happened during one processor call.
///
/// The buffer always comes back to the caller; this records which filters
/// ran, in order, and which requests were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    applied: Vec<AppliedFilter>,
    issues: Vec<FilterIssue>,
}

impl ApplyReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filter that ran.
    pub fn record_applied(&mut self, applied: AppliedFilter) {
        self.applied.push(applied);
    }

    /// Record a non-fatal issue.
    pub fn record_issue(&mut self, issue: FilterIssue) {
        self.issues.push(issue);
    }

    /// Filters that ran, in order.
    pub fn applied(&self) -> &[AppliedFilter] {
        &self.applied
    }

    /// Issues met, in order.
    pub fn issues(&self) -> &[FilterIssue] {
        &self.issues
    }

    /// Names that were requested but not found.
    pub fn skipped_names(&self) -> Vec<&str> {
        self.issues.iter().filter_map(|i| i.skipped_name()).collect()
    }

    /// Whether the call ran without any issue.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Append another report, keeping order.
    pub fn merge(&mut self, other: ApplyReport) {
        self.applied.extend(other.applied);
        self.issues.extend(other.issues);
    }

    /// One-line summary.
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            format!("Applied {} filter(s)", self.applied.len())
        } else {
            format!(
                "Applied {} filter(s) with {} issue(s)",
                self.applied.len(),
                self.issues.len()
            )
        }
    }
}
