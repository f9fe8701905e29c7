//! Validation traits, options and reports.
//!
//! This module defines the seam between hosts and verification engines, the
//! options a verification runs with, and the report produced for tooling.

use crate::{Inspect, Result, VERIFY_TAG, Value, VerifyError};
use serde::Serialize;

/// Core trait for verifying records.
///
/// # Example
///
/// ```rust
/// use verify_core::{RecordValidator, Result, Value, VerifyError};
///
/// struct RejectAll;
///
/// impl RecordValidator for RejectAll {
///     fn validate_value(&self, _value: &Value) -> Result<()> {
///         Err(VerifyError::InvalidKind)
///     }
/// }
///
/// assert!(RejectAll.validate(&true).is_err());
/// ```
pub trait RecordValidator: Send + Sync {
    /// Verifies an already inspected value.
    fn validate_value(&self, value: &Value) -> Result<()>;

    /// Inspects `input` and verifies it.
    fn validate(&self, input: &dyn Inspect) -> Result<()> {
        self.validate_value(&input.to_value())
    }
}

/// Options controlling a verification run.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Metadata key holding each field's rule expression
    pub tag_key: String,

    /// Treat unrecognized keywords as structural errors instead of ignoring them
    pub strict_keywords: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            tag_key: VERIFY_TAG.to_string(),
            strict_keywords: false,
        }
    }
}

impl VerifyOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads rule expressions from a different tag.
    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    /// Sets strict keyword handling.
    pub fn with_strict_keywords(mut self, strict: bool) -> Self {
        self.strict_keywords = strict;
        self
    }
}

/// Outcome of verifying one record, for display and serialization.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    /// Name of the verified record, if the input resolved to one
    pub record: Option<String>,

    /// Whether every rule passed
    pub passed: bool,

    /// Error message, if any
    pub error: Option<String>,

    /// Whether the error is a declaration fault rather than bad data
    pub structural: bool,

    /// Execution statistics
    pub stats: VerificationStats,
}

/// Statistics about a verification run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerificationStats {
    /// Fields whose rules were evaluated
    pub fields_checked: usize,

    /// Fields without rules
    pub fields_skipped: usize,

    /// Clauses in the rule expressions of checked fields
    pub clauses_evaluated: usize,

    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl VerificationReport {
    /// Builds a report from the outcome of a run.
    pub fn from_outcome(
        record: Option<String>,
        outcome: &Result<()>,
        stats: VerificationStats,
    ) -> Self {
        Self {
            record,
            passed: outcome.is_ok(),
            error: outcome.as_ref().err().map(VerifyError::to_string),
            structural: outcome.as_ref().err().is_some_and(VerifyError::is_structural),
            stats,
        }
    }
}
