//! Error types for record verification.
//!
//! Two classes of failure exist. Structural errors mean a rule was declared
//! wrongly (or the input is not a record at all) and abort verification at
//! once. Violations mean the data failed a well-formed rule; they are
//! collected per field and reported together.

use crate::{Keyword, Kind, NumericKind, Threshold};
use std::fmt;
use thiserror::Error;

/// Result type for verification operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// The single error returned by a verification call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError {
    /// Input did not resolve to a record
    #[error("value provided must be a record, an interface wrapping one, or a reference to one")]
    InvalidKind,

    /// A rule clause is malformed or does not fit the field
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// One field failed one or more of its rules
    #[error(transparent)]
    Violations(#[from] Violations),
}

impl VerifyError {
    /// Returns true for declaration faults, false for data violations.
    pub fn is_structural(&self) -> bool {
        !matches!(self, VerifyError::Violations(_))
    }

    /// Returns the violations if this is a data error.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            VerifyError::Violations(v) => Some(v),
            _ => None,
        }
    }
}

/// A rule declaration fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Keyword requires `=value` but none was given
    #[error("{keyword} must specify a size")]
    MissingValue { keyword: Keyword },

    /// The value part could not be parsed as a number
    #[error("{keyword} value must be a number")]
    NotANumber { keyword: Keyword, raw: String },

    /// Keyword applied to a kind it does not support
    #[error("{keyword} can only be used with types: {}", .keyword.applicable_types())]
    UnsupportedKind { keyword: Keyword, kind: Kind },

    /// Integer field with a decimal threshold, or the reverse
    #[error("{field} type is {field_kind} while {keyword} is {literal_kind}")]
    LiteralMismatch {
        field: String,
        keyword: Keyword,
        field_kind: NumericKind,
        literal_kind: NumericKind,
    },

    /// Unrecognized keyword, reported only when strict keywords are enabled
    #[error("{field} uses unrecognized rule keyword '{keyword}'")]
    UnknownKeyword { field: String, keyword: String },
}

/// One failed clause on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    LengthBelow { field: String, min: i64 },
    LengthAbove { field: String, max: i64 },
    ValueBelow { field: String, min: Threshold },
    ValueAbove { field: String, max: Threshold },
    ZeroValue { field: String },
}

impl Violation {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Violation::LengthBelow { field, .. }
            | Violation::LengthAbove { field, .. }
            | Violation::ValueBelow { field, .. }
            | Violation::ValueAbove { field, .. }
            | Violation::ZeroValue { field } => field,
        }
    }

    /// Keyword whose clause failed.
    pub fn keyword(&self) -> Keyword {
        match self {
            Violation::LengthBelow { .. } => Keyword::MinSize,
            Violation::LengthAbove { .. } => Keyword::MaxSize,
            Violation::ValueBelow { .. } => Keyword::Min,
            Violation::ValueAbove { .. } => Keyword::Max,
            Violation::ZeroValue { .. } => Keyword::Required,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::LengthBelow { field, min } => {
                write!(f, "{field} has a length less than {min}")
            }
            Violation::LengthAbove { field, max } => {
                write!(f, "{field} has a length greater than {max}")
            }
            Violation::ValueBelow { field, min } => {
                write!(f, "{field} has value less than min {min}")
            }
            Violation::ValueAbove { field, max } => {
                write!(f, "{field} has value greater than max {max}")
            }
            Violation::ZeroValue { field } => {
                write!(f, "{field} is required but is set to zero value")
            }
        }
    }
}

/// The ordered violations found on a single field.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("verify found the following errors: [{}]", join(.violations))]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns true if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Iterates violations in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// `Ok(())` when empty, otherwise the aggregated error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::Violations(self))
        }
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_violations_message() {
        let violations: Violations = [
            Violation::ZeroValue {
                field: "A".to_string(),
            },
            Violation::ValueAbove {
                field: "A".to_string(),
                max: Threshold::Int(-1),
            },
        ]
        .into_iter()
        .collect();

        let err = violations.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "verify found the following errors: [A is required but is set to zero value, A has value greater than max -1]"
        );
        assert!(!err.is_structural());
    }

    #[test]
    fn test_empty_violations_pass() {
        assert_eq!(Violations::new().into_result(), Ok(()));
    }

    #[test]
    fn test_structural_messages() {
        let missing = StructuralError::MissingValue {
            keyword: Keyword::MinSize,
        };
        assert_eq!(missing.to_string(), "minSize must specify a size");

        let nan = StructuralError::NotANumber {
            keyword: Keyword::Max,
            raw: "abc".to_string(),
        };
        assert_eq!(nan.to_string(), "max value must be a number");

        let kind = StructuralError::UnsupportedKind {
            keyword: Keyword::Min,
            kind: Kind::String,
        };
        assert_eq!(
            kind.to_string(),
            "min can only be used with types: i8, i16, i32, i64, isize, f32, or f64"
        );

        let mismatch = StructuralError::LiteralMismatch {
            field: "E".to_string(),
            keyword: Keyword::Min,
            field_kind: NumericKind::Int,
            literal_kind: NumericKind::Float,
        };
        assert_eq!(mismatch.to_string(), "E type is int while min is float");

        let err = VerifyError::from(mismatch);
        assert!(err.is_structural());
        assert!(VerifyError::InvalidKind.is_structural());
    }
}
