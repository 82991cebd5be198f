// SPDX-License-Identifier: MIT

//! Relational comparison without dynamic evaluation
//!
//! The operator arrives as configuration data. Rather than executing it, the
//! two values are first classified into a [`Bucket`], and the operator is then
//! looked up in that bucket's fixed membership table.

use crate::error::DisplayLogicError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted in declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// ==
    Eq,
    /// ===
    StrictEq,
    /// !=
    NotEq,
    /// !==
    StrictNotEq,
    /// <
    Lt,
    /// <=
    Lte,
    /// >
    Gt,
    /// >=
    Gte,
}

impl CompareOp {
    pub const ALL: [CompareOp; 8] = [
        CompareOp::Eq,
        CompareOp::StrictEq,
        CompareOp::NotEq,
        CompareOp::StrictNotEq,
        CompareOp::Lt,
        CompareOp::Lte,
        CompareOp::Gt,
        CompareOp::Gte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::StrictEq => "===",
            CompareOp::NotEq => "!=",
            CompareOp::StrictNotEq => "!==",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompareOp {
    type Err = DisplayLogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompareOp::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s.trim())
            .ok_or_else(|| DisplayLogicError::unknown_operator(s))
    }
}

/// Three-way classification of the configured value against the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// value == current
    Equal,
    /// value < current
    Less,
    /// value > current
    Greater,
}

const EQUAL_OPS: &[CompareOp] = &[
    CompareOp::Eq,
    CompareOp::StrictEq,
    CompareOp::Gte,
    CompareOp::Lte,
];
const LESS_OPS: &[CompareOp] = &[
    CompareOp::NotEq,
    CompareOp::StrictNotEq,
    CompareOp::Gt,
    CompareOp::Gte,
];
const GREATER_OPS: &[CompareOp] = &[
    CompareOp::NotEq,
    CompareOp::StrictNotEq,
    CompareOp::Lt,
    CompareOp::Lte,
];

impl Bucket {
    /// Classify `value` relative to `current`.
    ///
    /// Numeric when both sides parse as finite numbers, string ordering
    /// otherwise. Returns `None` when there is no current value.
    pub fn classify(value: &str, current: Option<&str>) -> Option<Bucket> {
        let current = current?;

        let ordering = match (parse_number(value), parse_number(current)) {
            (Some(a), Some(b)) => a.partial_cmp(&b)?,
            _ => value.cmp(current),
        };

        Some(match ordering {
            Ordering::Equal => Bucket::Equal,
            Ordering::Less => Bucket::Less,
            Ordering::Greater => Bucket::Greater,
        })
    }

    /// Operators that hold for this bucket
    pub fn members(&self) -> &'static [CompareOp] {
        match self {
            Bucket::Equal => EQUAL_OPS,
            Bucket::Less => LESS_OPS,
            Bucket::Greater => GREATER_OPS,
        }
    }

    pub fn satisfies(&self, op: CompareOp) -> bool {
        self.members().contains(&op)
    }
}

/// Parse a control value as a finite number.
///
/// Words like `nan` or `inf` stay strings.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Does `current <op> value` hold?
///
/// Unresolvable comparisons yield `false`.
pub fn compare(op: CompareOp, value: &str, current: Option<&str>) -> bool {
    match Bucket::classify(value, current) {
        Some(bucket) => bucket.satisfies(op),
        None => {
            log::trace!("unresolvable comparison: {:?} {} {:?}", current, op, value);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip_through_str() {
        for op in CompareOp::ALL {
            assert_eq!(op.as_str().parse::<CompareOp>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operator() {
        let err = "=~".parse::<CompareOp>().unwrap_err();
        assert!(matches!(err, DisplayLogicError::UnknownOperator(ref op) if op == "=~"));
        assert!("".parse::<CompareOp>().is_err());
        assert!("contains".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_operator_tolerates_whitespace() {
        assert_eq!(" >= ".parse::<CompareOp>().unwrap(), CompareOp::Gte);
    }

    #[test]
    fn test_bucket_truth_table() {
        use CompareOp::*;

        let table: [(Bucket, [(CompareOp, bool); 8]); 3] = [
            (
                Bucket::Equal,
                [
                    (Eq, true),
                    (StrictEq, true),
                    (NotEq, false),
                    (StrictNotEq, false),
                    (Lt, false),
                    (Lte, true),
                    (Gt, false),
                    (Gte, true),
                ],
            ),
            (
                Bucket::Less,
                [
                    (Eq, false),
                    (StrictEq, false),
                    (NotEq, true),
                    (StrictNotEq, true),
                    (Lt, false),
                    (Lte, false),
                    (Gt, true),
                    (Gte, true),
                ],
            ),
            (
                Bucket::Greater,
                [
                    (Eq, false),
                    (StrictEq, false),
                    (NotEq, true),
                    (StrictNotEq, true),
                    (Lt, true),
                    (Lte, true),
                    (Gt, false),
                    (Gte, false),
                ],
            ),
        ];

        // One (value, current) pair per bucket
        let inputs = [
            (Bucket::Equal, "5", "5"),
            (Bucket::Less, "3", "5"),
            (Bucket::Greater, "7", "5"),
        ];

        for (bucket, expectations) in table {
            let &(_, value, current) = inputs.iter().find(|(b, _, _)| *b == bucket).unwrap();
            assert_eq!(Bucket::classify(value, Some(current)), Some(bucket));
            for (op, expected) in expectations {
                assert_eq!(bucket.satisfies(op), expected, "{:?} {}", bucket, op);
                assert_eq!(
                    compare(op, value, Some(current)),
                    expected,
                    "{} {} {}",
                    current,
                    op,
                    value
                );
            }
        }
    }

    #[test]
    fn test_numeric_comparison_is_not_lexicographic() {
        // "10" sorts before "9" as a string, but not as a number
        assert_eq!(Bucket::classify("9", Some("10")), Some(Bucket::Less));
        assert!(compare(CompareOp::Gt, "9", Some("10")));
        assert_eq!(Bucket::classify("3", Some("3.0")), Some(Bucket::Equal));
        assert_eq!(Bucket::classify(" 4 ", Some("4")), Some(Bucket::Equal));
    }

    #[test]
    fn test_string_comparison() {
        assert!(compare(CompareOp::Eq, "boxed", Some("boxed")));
        assert!(compare(CompareOp::NotEq, "boxed", Some("full")));
        assert!(!compare(CompareOp::Eq, "boxed", Some("full")));
        assert_eq!(Bucket::classify("apple", Some("banana")), Some(Bucket::Less));
        assert_eq!(Bucket::classify("", Some("0")), Some(Bucket::Less));
    }

    #[test]
    fn test_missing_current_value_is_unresolvable() {
        assert_eq!(Bucket::classify("left", None), None);
        for op in CompareOp::ALL {
            assert!(!compare(op, "left", None));
        }
    }

    #[test]
    fn test_special_float_words_compare_as_strings() {
        assert_eq!(Bucket::classify("nan", Some("nan")), Some(Bucket::Equal));
        assert!(compare(CompareOp::Eq, "nan", Some("nan")));
        assert!(compare(CompareOp::NotEq, "NaN", Some("1")));
        assert!(!compare(CompareOp::Eq, "inf", Some("infinity")));
        assert!(compare(CompareOp::StrictNotEq, "Infinity", Some("INF")));
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
        assert_eq!(parse_number(""), None);
        for word in ["nan", "NaN", "inf", "-inf", "infinity", "Infinity", "1e999"] {
            assert_eq!(parse_number(word), None, "{}", word);
        }
    }
}
