//! Comparison operators for the [`Compare`](crate::Compare) predicate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Comparison operator applied between a candidate and an operand.
///
/// - **Ordering**: `Eq`, `Ne`, `Gt`, `Gte`, `Lt`, `Lte` on numbers, strings
///   and booleans
/// - **Text**: `StartsWith`, `EndsWith`, `Contains` on strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// String contains substring.
    Contains,
}

impl Op {
    /// Returns `true` for operators decided by an [`Ordering`].
    pub fn is_ordering_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Returns `true` for operators that only apply to strings.
    pub fn is_text_op(self) -> bool {
        matches!(self, Op::StartsWith | Op::EndsWith | Op::Contains)
    }

    /// Evaluates an ordering-based operator.
    ///
    /// Text operators always yield `false` here.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Evaluates a text operator between a candidate and a pattern.
    ///
    /// Ordering operators compare the strings lexicographically.
    pub fn eval_text(self, candidate: &str, pattern: &str) -> bool {
        match self {
            Op::StartsWith => candidate.starts_with(pattern),
            Op::EndsWith => candidate.ends_with(pattern),
            Op::Contains => candidate.contains(pattern),
            ordering_op => ordering_op.eval_ordering(candidate.cmp(pattern)),
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "eq",
            Op::Ne => "ne",
            Op::Gt => "gt",
            Op::Gte => "gte",
            Op::Lt => "lt",
            Op::Lte => "lte",
            Op::StartsWith => "starts_with",
            Op::EndsWith => "ends_with",
            Op::Contains => "contains",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
