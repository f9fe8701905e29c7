//! Rule expression parsing.
//!
//! A rule expression is a comma-separated list of clauses; each clause is a
//! keyword optionally followed by `=` and a value:
//!
//! ```text
//! expr   := clause (',' clause)*
//! clause := keyword ['=' value]
//! ```
//!
//! Splitting is purely lexical. Tokens are not trimmed, so `min=1, max=5`
//! yields the keyword ` max`, which is not recognized and therefore ignored.

use std::fmt;
use verify_core::{Keyword, StructuralError, Threshold};

/// One `keyword[=value]` unit of a rule expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    /// Keyword text as written
    pub name: &'a str,

    /// Recognized keyword, or `None` for text the evaluator ignores
    pub keyword: Option<Keyword>,

    /// Everything after the first `=`, if there was one
    pub value: Option<&'a str>,
}

impl<'a> Clause<'a> {
    /// Parses a single clause token.
    pub fn parse(token: &'a str) -> Self {
        let (name, value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };

        Self {
            name,
            keyword: Keyword::from_name(name),
            value,
        }
    }

    /// Returns the raw value, or a structural error if the clause is bare.
    pub fn value_for(&self, keyword: Keyword) -> Result<&'a str, StructuralError> {
        self.value.ok_or(StructuralError::MissingValue { keyword })
    }
}

impl fmt::Display for Clause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{}={}", self.name, value),
            None => f.write_str(self.name),
        }
    }
}

/// Splits a rule expression into clauses, in evaluation order.
///
/// Never fails: an empty expression yields one empty clause, which is not a
/// recognized keyword.
///
/// # Example
///
/// ```rust
/// use verify_parser::parse_rules;
/// use verify_core::Keyword;
///
/// let clauses = parse_rules("required,min=3");
/// assert_eq!(clauses.len(), 2);
/// assert_eq!(clauses[0].keyword, Some(Keyword::Required));
/// assert_eq!(clauses[1].value, Some("3"));
/// ```
pub fn parse_rules(expression: &str) -> Vec<Clause<'_>> {
    expression.split(',').map(Clause::parse).collect()
}

/// Parses the base-10 length literal of a `minSize`/`maxSize` clause.
///
/// A leading sign is accepted, so negative sizes are legal.
pub fn parse_size(keyword: Keyword, raw: &str) -> Result<i64, StructuralError> {
    raw.parse::<i64>()
        .map_err(|_| StructuralError::NotANumber {
            keyword,
            raw: raw.to_string(),
        })
}

/// Parses the literal of a `min`/`max` clause.
///
/// The literal is tried as a 64-bit integer first and as a 64-bit float
/// second; the result remembers which one matched. Floats may be decimal or
/// hexadecimal with a binary exponent (`0x1p-2`). A decimal literal too large
/// for an `f64` is not a number; `inf`, `infinity` and `nan` are.
pub fn parse_threshold(keyword: Keyword, raw: &str) -> Result<Threshold, StructuralError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Threshold::Int(i));
    }
    parse_float(raw)
        .map(Threshold::Float)
        .ok_or_else(|| StructuralError::NotANumber {
            keyword,
            raw: raw.to_string(),
        })
}

fn parse_float(raw: &str) -> Option<f64> {
    if let Some(x) = parse_hex_float(raw) {
        return Some(x);
    }
    let x: f64 = raw.parse().ok()?;
    (x.is_finite() || is_special_float(raw)).then_some(x)
}

/// Signed infinities, or an unsigned NaN, in any letter case.
fn is_special_float(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf")
        || unsigned.eq_ignore_ascii_case("infinity")
        || raw.eq_ignore_ascii_case("nan")
}

/// Parses `[sign] 0x mantissa p [sign] exponent`, e.g. `-0X1.8P+3`.
///
/// The binary exponent is mandatory and underscores are not accepted.
/// Mantissa digits beyond 56 bits are dropped.
fn parse_hex_float(raw: &str) -> Option<f64> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let body = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))?;
    let (mantissa, exponent) = body.split_once(['p', 'P'])?;
    let exponent: i32 = exponent.parse().ok()?;

    let mut bits: u64 = 0;
    let mut shift: i32 = 0;
    let mut digits = 0;
    let mut seen_point = false;
    for c in mantissa.chars() {
        if c == '.' {
            if seen_point {
                return None;
            }
            seen_point = true;
            continue;
        }
        let digit = c.to_digit(16)?;
        digits += 1;
        if bits >> 56 == 0 {
            bits = (bits << 4) | u64::from(digit);
            if seen_point {
                shift -= 4;
            }
        } else if !seen_point {
            shift += 4;
        }
    }
    if digits == 0 {
        return None;
    }

    let value = scale_by_two(bits as f64, exponent.saturating_add(shift));
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

fn scale_by_two(mut x: f64, mut exp: i32) -> f64 {
    while exp > 1000 && x.is_finite() && x != 0.0 {
        x *= 2f64.powi(1000);
        exp -= 1000;
    }
    while exp < -1000 && x != 0.0 {
        x *= 2f64.powi(-1000);
        exp += 1000;
    }
    x * 2f64.powi(exp.clamp(-1100, 1100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bare_and_valued_clauses() {
        let clauses = parse_rules("required,minSize=5,max=-1.5");
        assert_eq!(
            clauses,
            vec![
                Clause {
                    name: "required",
                    keyword: Some(Keyword::Required),
                    value: None,
                },
                Clause {
                    name: "minSize",
                    keyword: Some(Keyword::MinSize),
                    value: Some("5"),
                },
                Clause {
                    name: "max",
                    keyword: Some(Keyword::Max),
                    value: Some("-1.5"),
                },
            ]
        );
    }

    #[test]
    fn test_split_on_first_equals_only() {
        let clause = Clause::parse("min==3");
        assert_eq!(clause.keyword, Some(Keyword::Min));
        assert_eq!(clause.value, Some("=3"));
    }

    #[test]
    fn test_unknown_and_untrimmed_keywords() {
        let clauses = parse_rules("min=1, max=5,,Required");
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[1].name, " max");
        assert_eq!(clauses[1].keyword, None);
        assert_eq!(clauses[2].name, "");
        assert_eq!(clauses[2].keyword, None);
        assert_eq!(clauses[3].keyword, None);
    }

    #[test]
    fn test_empty_value_is_present_but_empty() {
        let clause = Clause::parse("min=");
        assert_eq!(clause.value_for(Keyword::Min), Ok(""));
        assert!(parse_threshold(Keyword::Min, "").is_err());
    }

    #[test]
    fn test_bare_clause_missing_value() {
        let clause = Clause::parse("maxSize");
        assert_eq!(
            clause.value_for(Keyword::MaxSize),
            Err(StructuralError::MissingValue {
                keyword: Keyword::MaxSize
            })
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(Keyword::MinSize, "5"), Ok(5));
        assert_eq!(parse_size(Keyword::MinSize, "-2"), Ok(-2));
        assert_eq!(parse_size(Keyword::MinSize, "+2"), Ok(2));
        assert!(parse_size(Keyword::MinSize, "2.5").is_err());
        assert!(parse_size(Keyword::MinSize, "abc").is_err());
    }

    #[test]
    fn test_parse_threshold_prefers_integers() {
        assert_eq!(parse_threshold(Keyword::Min, "2"), Ok(Threshold::Int(2)));
        assert_eq!(parse_threshold(Keyword::Min, "2.0"), Ok(Threshold::Float(2.0)));
        assert_eq!(parse_threshold(Keyword::Min, "1e3"), Ok(Threshold::Float(1000.0)));
        assert_eq!(
            parse_threshold(Keyword::Max, "abc"),
            Err(StructuralError::NotANumber {
                keyword: Keyword::Max,
                raw: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_parse_threshold_rejects_overflowing_decimals() {
        assert_eq!(
            parse_threshold(Keyword::Max, "1e400"),
            Err(StructuralError::NotANumber {
                keyword: Keyword::Max,
                raw: "1e400".to_string()
            })
        );
        assert!(parse_threshold(Keyword::Min, "-1e400").is_err());
        assert!(parse_threshold(Keyword::Min, "+nan").is_err());
    }

    #[test]
    fn test_parse_threshold_special_spellings() {
        assert_eq!(
            parse_threshold(Keyword::Min, "inf"),
            Ok(Threshold::Float(f64::INFINITY))
        );
        assert_eq!(
            parse_threshold(Keyword::Min, "-Infinity"),
            Ok(Threshold::Float(f64::NEG_INFINITY))
        );
        assert!(matches!(
            parse_threshold(Keyword::Max, "NaN"),
            Ok(Threshold::Float(x)) if x.is_nan()
        ));
    }

    #[test]
    fn test_parse_threshold_hex_floats() {
        assert_eq!(parse_threshold(Keyword::Min, "0x1p-2"), Ok(Threshold::Float(0.25)));
        assert_eq!(parse_threshold(Keyword::Min, "-0X1.8P+3"), Ok(Threshold::Float(-12.0)));
        assert_eq!(parse_threshold(Keyword::Max, "0x.8p1"), Ok(Threshold::Float(1.0)));
        assert!(parse_threshold(Keyword::Max, "0x10").is_err());
        assert!(parse_threshold(Keyword::Max, "0xp1").is_err());
        assert!(parse_threshold(Keyword::Max, "0x1p9999").is_err());
    }

    #[test]
    fn test_clause_display() {
        assert_eq!(Clause::parse("min=3").to_string(), "min=3");
        assert_eq!(Clause::parse("required").to_string(), "required");
    }
}
