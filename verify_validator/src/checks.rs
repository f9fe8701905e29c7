//! Per-keyword clause checks.
//!
//! Each check follows the same order: the clause value must be present, then
//! parse, then the field's kind must be one the keyword accepts. Only then is
//! the field value compared.
//!
//! - minSize / maxSize: length bounds for sized kinds
//! - min / max: numeric bounds; the literal's numeric family must match the field's
//! - required: the value must differ from its kind's zero value

use verify_core::{Keyword, NumericKind, StructuralError, Threshold, Value, Violation};
use verify_parser::{Clause, parse_size, parse_threshold};

/// Outcome of one clause: a structural fault, a violation, or nothing.
pub type ClauseResult = Result<Option<Violation>, StructuralError>;

/// Checks a single recognized clause against a field value.
pub fn check_clause(clause: &Clause<'_>, keyword: Keyword, field: &str, value: &Value) -> ClauseResult {
    match keyword {
        Keyword::MinSize | Keyword::MaxSize => check_size(clause, keyword, field, value),
        Keyword::Min | Keyword::Max => check_bound(clause, keyword, field, value),
        Keyword::Required => Ok(check_required(field, value)),
    }
}

fn check_size(clause: &Clause<'_>, keyword: Keyword, field: &str, value: &Value) -> ClauseResult {
    let size = parse_size(keyword, clause.value_for(keyword)?)?;
    let len = value.len().ok_or(StructuralError::UnsupportedKind {
        keyword,
        kind: value.kind(),
    })?;
    let len = i64::try_from(len).unwrap_or(i64::MAX);

    let violation = match keyword {
        Keyword::MinSize if len < size => Some(Violation::LengthBelow {
            field: field.to_string(),
            min: size,
        }),
        Keyword::MaxSize if len > size => Some(Violation::LengthAbove {
            field: field.to_string(),
            max: size,
        }),
        _ => None,
    };

    Ok(violation)
}

fn check_bound(clause: &Clause<'_>, keyword: Keyword, field: &str, value: &Value) -> ClauseResult {
    let threshold = parse_threshold(keyword, clause.value_for(keyword)?)?;

    let out_of_bounds = match (value, threshold) {
        (Value::Int(_, actual), Threshold::Int(limit)) => match keyword {
            Keyword::Min => *actual < limit,
            _ => *actual > limit,
        },
        (Value::Float(_, actual), Threshold::Float(limit)) => match keyword {
            Keyword::Min => *actual < limit,
            _ => *actual > limit,
        },
        (Value::Int(..), Threshold::Float(_)) => {
            return Err(mismatch(field, keyword, NumericKind::Int, NumericKind::Float));
        }
        (Value::Float(..), Threshold::Int(_)) => {
            return Err(mismatch(field, keyword, NumericKind::Float, NumericKind::Int));
        }
        _ => {
            return Err(StructuralError::UnsupportedKind {
                keyword,
                kind: value.kind(),
            });
        }
    };

    if !out_of_bounds {
        return Ok(None);
    }

    let field = field.to_string();
    Ok(Some(match keyword {
        Keyword::Min => Violation::ValueBelow {
            field,
            min: threshold,
        },
        _ => Violation::ValueAbove {
            field,
            max: threshold,
        },
    }))
}

fn mismatch(
    field: &str,
    keyword: Keyword,
    field_kind: NumericKind,
    literal_kind: NumericKind,
) -> StructuralError {
    StructuralError::LiteralMismatch {
        field: field.to_string(),
        keyword,
        field_kind,
        literal_kind,
    }
}

/// Arrays and records always pass; nilable kinds fail only when absent.
fn check_required(field: &str, value: &Value) -> Option<Violation> {
    match value {
        Value::Array(_) | Value::Record(_) => None,
        other if other.is_zero() => Some(Violation::ZeroValue {
            field: field.to_string(),
        }),
        _ => None,
    }
}
