//! Record traversal.
//!
//! The walker resolves an input to a record, then visits its fields in
//! declaration order. Fields without a rule expression are skipped; the first
//! field that fails ends the walk with that field's error.

use crate::evaluator::evaluate_clauses;
use tracing::debug;
use verify_core::{Record, Result, Value, VerificationStats, VerifyError, VerifyOptions};
use verify_parser::parse_rules;

/// Follows references and interfaces down to a record.
///
/// # Errors
///
/// Returns `VerifyError::InvalidKind` if the chain ends in anything other
/// than a record, including an absent reference or an empty interface.
pub fn resolve_record(value: &Value) -> Result<&Record> {
    value
        .resolve()
        .and_then(Value::as_record)
        .ok_or(VerifyError::InvalidKind)
}

/// Verifies every tagged field of `record`, stopping at the first failure.
pub(crate) fn walk_record(
    record: &Record,
    options: &VerifyOptions,
    stats: &mut VerificationStats,
) -> Result<()> {
    for field in &record.fields {
        let Some(expression) = field.tag(&options.tag_key) else {
            debug!(record = %record.name, field = %field.name, "Skipping field without rules");
            stats.fields_skipped += 1;
            continue;
        };

        let clauses = parse_rules(expression);
        stats.fields_checked += 1;
        stats.clauses_evaluated += clauses.len();

        debug!(
            record = %record.name,
            field = %field.name,
            kind = %field.value.kind(),
            expression,
            "Verifying field"
        );

        if let Err(err) =
            evaluate_clauses(&field.value, &field.name, &clauses, options.strict_keywords)
        {
            debug!(record = %record.name, field = %field.name, error = %err, "Field failed verification");
            return Err(err);
        }
    }

    Ok(())
}
