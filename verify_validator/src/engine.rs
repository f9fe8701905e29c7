//! Main verification engine.
//!
//! This module provides the `Verifier` that ties record resolution, field
//! traversal and rule evaluation together, plus the free functions most
//! callers use.

use crate::evaluator::lint_rules;
use crate::walker::{resolve_record, walk_record};
use std::time::Instant;
use verify_core::{
    Inspect, Kind, RecordValidator, Result, StructuralError, Value, VerificationReport,
    VerificationStats, VerifyOptions,
};

/// Verifies `input` with default options.
///
/// `input` may be a record, an interface wrapping one, or any number of
/// references to one. The result is the first field's error, if any.
///
/// # Example
///
/// ```rust
/// use verify_core::record;
/// use verify_validator::validate;
///
/// record! {
///     struct Foo {
///         #[verify("min=3")]
///         a: i64,
///     }
/// }
///
/// let err = validate(&Foo { a: 2 }).unwrap_err();
/// assert!(err.to_string().contains("a has value less than min 3"));
/// assert!(validate(&Some(Foo { a: 3 })).is_ok());
/// assert!(validate(&true).is_err());
/// ```
pub fn validate<T: Inspect + ?Sized>(input: &T) -> Result<()> {
    Verifier::new().verify(input)
}

/// Verifies an already inspected value with default options.
pub fn validate_value(value: &Value) -> Result<()> {
    Verifier::new().verify_value(value)
}

/// Verification engine.
///
/// Holds only its options; every call is independent, so one `Verifier` can
/// be shared across threads.
///
/// # Example
///
/// ```rust
/// use verify_core::{RecordBuilder, Value, VerifyOptions};
/// use verify_validator::Verifier;
///
/// let record = RecordBuilder::new("Foo")
///     .field("tags", &Vec::<String>::new(), "minSize=5")
///     .build();
///
/// let verifier = Verifier::with_options(VerifyOptions::new().with_strict_keywords(true));
/// let report = verifier.report(&Value::Record(record));
///
/// assert!(!report.passed);
/// assert_eq!(
///     report.error.as_deref(),
///     Some("verify found the following errors: [tags has a length less than 5]")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    options: VerifyOptions,
}

impl Verifier {
    /// Creates a verifier with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a verifier with the given options.
    pub fn with_options(options: VerifyOptions) -> Self {
        Self { options }
    }

    /// Options this verifier runs with.
    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Inspects `input` and verifies it.
    pub fn verify<T: Inspect + ?Sized>(&self, input: &T) -> Result<()> {
        self.verify_value(&input.to_value())
    }

    /// Verifies an already inspected value.
    pub fn verify_value(&self, value: &Value) -> Result<()> {
        let mut stats = VerificationStats::default();
        self.run(value, &mut stats)
    }

    /// Verifies a value and returns a report with statistics.
    ///
    /// This never fails; the outcome is recorded in the report.
    pub fn report(&self, value: &Value) -> VerificationReport {
        let start = Instant::now();
        let mut stats = VerificationStats::default();

        let outcome = self.run(value, &mut stats);
        stats.duration_ms = start.elapsed().as_millis() as u64;

        let record = resolve_record(value).ok().map(|r| r.name.clone());
        VerificationReport::from_outcome(record, &outcome, stats)
    }

    /// Checks a rule expression for a field of `kind` without any data.
    ///
    /// Returns every structural problem found; an empty list means the
    /// expression is well-formed for that kind.
    pub fn check_rules(&self, field: &str, kind: Kind, expression: &str) -> Vec<StructuralError> {
        lint_rules(field, kind, expression, self.options.strict_keywords)
    }

    fn run(&self, value: &Value, stats: &mut VerificationStats) -> Result<()> {
        let record = resolve_record(value)?;
        walk_record(record, &self.options, stats)
    }
}

impl RecordValidator for Verifier {
    fn validate_value(&self, value: &Value) -> Result<()> {
        self.verify_value(value)
    }
}
