//! Rule evaluation for a single field.
//!
//! Clauses are evaluated in expression order. Violations accumulate for the
//! whole field; the first structural error returns immediately and drops any
//! violations collected so far.

use crate::checks::check_clause;
use tracing::trace;
use verify_core::{Kind, Result, StructuralError, Value, Violations};
use verify_parser::{Clause, parse_rules};

/// Evaluates a rule expression against one field value.
///
/// Unrecognized keywords are ignored.
///
/// # Example
///
/// ```rust
/// use verify_core::Inspect;
/// use verify_validator::evaluate_field;
///
/// let err = evaluate_field(&2i64.to_value(), "A", "min=3").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "verify found the following errors: [A has value less than min 3]"
/// );
/// ```
pub fn evaluate_field(value: &Value, field: &str, expression: &str) -> Result<()> {
    evaluate_clauses(value, field, &parse_rules(expression), false)
}

/// Evaluates already parsed clauses against one field value.
///
/// With `strict_keywords` set, an unrecognized keyword is a structural error
/// instead of being skipped.
pub fn evaluate_clauses(
    value: &Value,
    field: &str,
    clauses: &[Clause<'_>],
    strict_keywords: bool,
) -> Result<()> {
    let mut violations = Violations::new();

    for clause in clauses {
        let Some(keyword) = clause.keyword else {
            if strict_keywords {
                return Err(unknown_keyword(field, clause).into());
            }
            trace!(field, clause = %clause, "Ignoring unrecognized rule keyword");
            continue;
        };

        trace!(field, clause = %clause, kind = %value.kind(), "Evaluating clause");
        if let Some(violation) = check_clause(clause, keyword, field, value)? {
            violations.push(violation);
        }
    }

    violations.into_result()
}

/// Reports every structural problem `expression` would raise on a field of
/// `kind`, without looking at any data.
///
/// Each clause is checked against the kind's zero value, so the result lists
/// all faults rather than stopping at the first.
pub fn lint_rules(
    field: &str,
    kind: Kind,
    expression: &str,
    strict_keywords: bool,
) -> Vec<StructuralError> {
    let zero = kind.zero_value();

    parse_rules(expression)
        .iter()
        .filter_map(|clause| match clause.keyword {
            Some(keyword) => check_clause(clause, keyword, field, &zero).err(),
            None if strict_keywords => Some(unknown_keyword(field, clause)),
            None => None,
        })
        .collect()
}

fn unknown_keyword(field: &str, clause: &Clause<'_>) -> StructuralError {
    StructuralError::UnknownKeyword {
        field: field.to_string(),
        keyword: clause.name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use verify_core::{FloatWidth, Inspect, IntWidth, Keyword, VerifyError};

    #[test]
    fn test_valid_field_passes() {
        assert_eq!(evaluate_field(&5i64.to_value(), "E", "min=3,max=7"), Ok(()));
    }

    #[test]
    fn test_violations_accumulate_in_order() {
        let err = evaluate_field(&0i64.to_value(), "A", "required,max=-1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "verify found the following errors: [A is required but is set to zero value, A has value greater than max -1]"
        );
        assert_eq!(err.violations().map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_structural_error_discards_violations() {
        let err = evaluate_field(&0i64.to_value(), "A", "required,min=abc").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "min value must be a number");
    }

    #[test]
    fn test_unknown_keywords_are_ignored() {
        assert_eq!(evaluate_field(&0i64.to_value(), "A", "positive,,min=-1"), Ok(()));
        assert_eq!(evaluate_field(&"".to_value(), "A", ""), Ok(()));
    }

    #[test]
    fn test_strict_keywords_reject_unknown() {
        let clauses = parse_rules("min=1,positive");
        let err = evaluate_clauses(&5i64.to_value(), "A", &clauses, true).unwrap_err();
        assert_eq!(
            err,
            VerifyError::Structural(StructuralError::UnknownKeyword {
                field: "A".to_string(),
                keyword: "positive".to_string(),
            })
        );
    }

    #[test]
    fn test_lint_reports_every_fault() {
        let problems = lint_rules("A", Kind::String, "minSize=x,min=3,required,maxSize", false);
        assert_eq!(
            problems,
            vec![
                StructuralError::NotANumber {
                    keyword: Keyword::MinSize,
                    raw: "x".to_string()
                },
                StructuralError::UnsupportedKind {
                    keyword: Keyword::Min,
                    kind: Kind::String
                },
                StructuralError::MissingValue {
                    keyword: Keyword::MaxSize
                },
            ]
        );
    }

    #[test]
    fn test_lint_detects_literal_mismatch() {
        let problems = lint_rules("D", Kind::Float(FloatWidth::W32), "max=2", false);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].to_string(), "D type is float while max is int");

        assert!(lint_rules("C", Kind::Int(IntWidth::W8), "min=3,max=7", true).is_empty());
    }
}
