//! Predicates over single values.
//!
//! A [`Predicate`] answers a yes/no question about one candidate. It is what
//! [`Check`](crate::Check) applies to the current element and what
//! [`FieldCheck`](crate::FieldCheck) applies to a resolved field. Any
//! `Fn(&V) -> bool` closure is a predicate; the types here cover the common
//! value comparisons.
//!
//! Predicates never fail. A candidate of the wrong shape does not match.

use regex::Regex;

use crate::error::Result;
use crate::inspect::ToValue;
use crate::op::Op;
use crate::value::Value;

/// A pure test over one candidate value.
pub trait Predicate<V: ?Sized>: Send + Sync {
    /// Returns `true` if the candidate satisfies this predicate.
    fn eval(&self, candidate: &V) -> bool;
}

impl<V, F> Predicate<V> for F
where
    V: ?Sized,
    F: Fn(&V) -> bool + Send + Sync,
{
    fn eval(&self, candidate: &V) -> bool {
        self(candidate)
    }
}

/// Shallow equality with a fixed value. See [`Value::shallow_eq`].
#[derive(Debug, Clone)]
pub struct ShallowEq(pub Value);

/// Deep (recursive) equality with a fixed value. See [`Value::deep_eq`].
#[derive(Debug, Clone)]
pub struct DeepEq(pub Value);

/// Length equality for lists, maps and strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Len(pub usize);

/// Operator comparison against a fixed operand.
#[derive(Debug, Clone)]
pub struct Compare {
    /// The comparison operator.
    pub op: Op,
    /// The value to compare against.
    pub operand: Value,
}

/// Regular expression match on string candidates.
#[derive(Debug, Clone)]
pub struct Matches(pub Regex);

/// Shallow equality check with the given value.
pub fn eq(value: impl Into<Value>) -> ShallowEq {
    ShallowEq(value.into())
}

/// Deep equality check with the given value.
pub fn deep_eq(value: impl Into<Value>) -> DeepEq {
    DeepEq(value.into())
}

/// Length check of a list, map or string.
pub fn len(n: usize) -> Len {
    Len(n)
}

pub fn ne(value: impl Into<Value>) -> Compare {
    Compare::new(Op::Ne, value)
}

pub fn gt(value: impl Into<Value>) -> Compare {
    Compare::new(Op::Gt, value)
}

pub fn gte(value: impl Into<Value>) -> Compare {
    Compare::new(Op::Gte, value)
}

pub fn lt(value: impl Into<Value>) -> Compare {
    Compare::new(Op::Lt, value)
}

pub fn lte(value: impl Into<Value>) -> Compare {
    Compare::new(Op::Lte, value)
}

pub fn starts_with(prefix: &str) -> Compare {
    Compare::new(Op::StartsWith, prefix)
}

pub fn ends_with(suffix: &str) -> Compare {
    Compare::new(Op::EndsWith, suffix)
}

pub fn contains(needle: &str) -> Compare {
    Compare::new(Op::Contains, needle)
}

/// String regex check.
///
/// Returns an error if the pattern is invalid.
pub fn matches_regex(pattern: &str) -> Result<Matches> {
    let regex = Regex::new(pattern)?;
    Ok(Matches(regex))
}

impl Compare {
    pub fn new(op: Op, operand: impl Into<Value>) -> Self {
        Compare {
            op,
            operand: operand.into(),
        }
    }

    /// Evaluates this comparison against a value.
    ///
    /// Numbers compare across representations, strings support the text
    /// operators, booleans support equality only. Anything else is `false`.
    pub fn matches(&self, candidate: &Value) -> bool {
        match (candidate, &self.operand) {
            (Value::Number(field), Value::Number(operand)) => {
                if self.op.is_text_op() {
                    return false;
                }
                match field.compare(*operand) {
                    Some(ordering) => self.op.eval_ordering(ordering),
                    None => false,
                }
            }
            (Value::String(field), Value::String(pattern)) => self.op.eval_text(field, pattern),
            (Value::Bool(field), Value::Bool(operand)) => match self.op {
                Op::Eq => field == operand,
                Op::Ne => field != operand,
                _ => false,
            },
            _ => false,
        }
    }
}

impl<T: ToValue + ?Sized> Predicate<T> for ShallowEq {
    fn eval(&self, candidate: &T) -> bool {
        self.0.shallow_eq(&candidate.as_value())
    }
}

impl<T: ToValue + ?Sized> Predicate<T> for DeepEq {
    fn eval(&self, candidate: &T) -> bool {
        self.0.deep_eq(&candidate.as_value())
    }
}

impl<T: ToValue + ?Sized> Predicate<T> for Len {
    fn eval(&self, candidate: &T) -> bool {
        candidate.as_value().length() == Some(self.0)
    }
}

impl<T: ToValue + ?Sized> Predicate<T> for Compare {
    fn eval(&self, candidate: &T) -> bool {
        self.matches(&candidate.as_value())
    }
}

impl<T: ToValue + ?Sized> Predicate<T> for Matches {
    fn eval(&self, candidate: &T) -> bool {
        match &*candidate.as_value() {
            Value::String(s) => self.0.is_match(s),
            _ => false,
        }
    }
}
