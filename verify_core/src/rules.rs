//! Rule vocabulary shared by the parser and the evaluator.

use crate::Kind;
use std::fmt;

/// A recognized rule keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Minimum length (inclusive)
    MinSize,
    /// Maximum length (inclusive)
    MaxSize,
    /// Minimum numeric value (inclusive)
    Min,
    /// Maximum numeric value (inclusive)
    Max,
    /// Value must differ from its kind's zero value
    Required,
}

impl Keyword {
    /// All keywords in documentation order.
    pub const ALL: [Keyword; 5] = [
        Keyword::MinSize,
        Keyword::MaxSize,
        Keyword::Min,
        Keyword::Max,
        Keyword::Required,
    ];

    /// Returns the keyword as written in rule expressions. Case-sensitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::MinSize => "minSize",
            Keyword::MaxSize => "maxSize",
            Keyword::Min => "min",
            Keyword::Max => "max",
            Keyword::Required => "required",
        }
    }

    /// Looks a keyword up by its exact spelling.
    pub fn from_name(name: &str) -> Option<Keyword> {
        Keyword::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether the keyword needs an `=value` part.
    pub fn takes_value(&self) -> bool {
        !matches!(self, Keyword::Required)
    }

    /// Whether the keyword can be applied to a field of `kind`.
    pub fn applies_to(&self, kind: Kind) -> bool {
        match self {
            Keyword::MinSize | Keyword::MaxSize => matches!(
                kind,
                Kind::String | Kind::Sequence | Kind::Array | Kind::Set | Kind::Map | Kind::Channel
            ),
            Keyword::Min | Keyword::Max => NumericKind::of(kind).is_some(),
            Keyword::Required => true,
        }
    }

    /// Human-readable list of the kinds this keyword applies to.
    pub fn applicable_types(&self) -> &'static str {
        match self {
            Keyword::MinSize | Keyword::MaxSize => {
                "string, sequence, array, set, map, or channel"
            }
            Keyword::Min | Keyword::Max => "i8, i16, i32, i64, isize, f32, or f64",
            Keyword::Required => "any kind",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric family of a field or threshold literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Int,
    Float,
}

impl NumericKind {
    /// Returns the numeric family of a kind that `min`/`max` accept.
    ///
    /// Unsigned integers are not comparable against signed thresholds and
    /// return `None`.
    pub fn of(kind: Kind) -> Option<NumericKind> {
        match kind {
            Kind::Int(_) => Some(NumericKind::Int),
            Kind::Float(_) => Some(NumericKind::Float),
            _ => None,
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Int => f.write_str("int"),
            NumericKind::Float => f.write_str("float"),
        }
    }
}

/// A parsed `min`/`max` literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Int(i64),
    Float(f64),
}

impl Threshold {
    /// Numeric family of the literal.
    pub fn numeric_kind(&self) -> NumericKind {
        match self {
            Threshold::Int(_) => NumericKind::Int,
            Threshold::Float(_) => NumericKind::Float,
        }
    }
}

/// Integers print as written; decimals print with six fractional digits.
/// Infinities print as `+Inf`/`-Inf` and NaN as `NaN`.
impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Int(i) => write!(f, "{i}"),
            Threshold::Float(x) if x.is_nan() => f.write_str("NaN"),
            Threshold::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_positive() { "+Inf" } else { "-Inf" })
            }
            Threshold::Float(x) => write!(f, "{x:.6}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FloatWidth, IntWidth};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_lookup_is_case_sensitive() {
        assert_eq!(Keyword::from_name("minSize"), Some(Keyword::MinSize));
        assert_eq!(Keyword::from_name("minsize"), None);
        assert_eq!(Keyword::from_name("Required"), None);
    }

    #[test]
    fn test_applies_to() {
        assert!(Keyword::MinSize.applies_to(Kind::Channel));
        assert!(!Keyword::MinSize.applies_to(Kind::Bool));
        assert!(!Keyword::MaxSize.applies_to(Kind::Reference));
        assert!(Keyword::Min.applies_to(Kind::Int(IntWidth::W8)));
        assert!(Keyword::Max.applies_to(Kind::Float(FloatWidth::W32)));
        assert!(!Keyword::Min.applies_to(Kind::Uint(IntWidth::W64)));
        assert!(!Keyword::Max.applies_to(Kind::String));
        assert!(Keyword::Required.applies_to(Kind::Record));
    }

    #[test]
    fn test_threshold_display() {
        assert_eq!(Threshold::Int(-3).to_string(), "-3");
        assert_eq!(Threshold::Float(2.1).to_string(), "2.100000");
    }

    #[test]
    fn test_non_finite_threshold_display() {
        assert_eq!(Threshold::Float(f64::INFINITY).to_string(), "+Inf");
        assert_eq!(Threshold::Float(f64::NEG_INFINITY).to_string(), "-Inf");
        assert_eq!(Threshold::Float(f64::NAN).to_string(), "NaN");
    }
}
