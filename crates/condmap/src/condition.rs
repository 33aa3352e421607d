//! The condition tree.
//!
//! A [`Condition`] is tested against a [`MatchContext`]: a whole sequence plus
//! the position under test. Element checks only look at the current element,
//! while [`Lookaround`](crate::Lookaround) also reads its neighbors.
//!
//! # Semantics
//!
//! - **[`And`]**: every sub-condition holds, evaluated left to right, stopping
//!   at the first failure
//! - **[`Or`]**: some sub-condition holds, stopping at the first success
//! - **[`Not`]**: the sub-condition does not hold
//! - **[`Check`]**: a predicate holds for the current element
//! - **[`FieldCheck`]**: a predicate holds for a field reached by a dotted path
//!
//! `And` and `Or` refuse to be built from an empty list.

use std::sync::Arc;

use crate::context::MatchContext;
use crate::error::{ConditionError, Result};
use crate::inspect::{resolve_path, Inspect};
use crate::predicate::Predicate;
use crate::value::Value;

/// A composable test over a position in a sequence.
///
/// Conditions are immutable once built and are `Send + Sync`, so a single
/// condition tree can be shared between mappings and threads.
pub trait Condition<T>: Send + Sync {
    /// Tests the element at the context's current index.
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool;
}

/// An owned, type-erased condition.
pub type BoxCondition<T> = Box<dyn Condition<T>>;

/// A shared, type-erased condition.
pub type SharedCondition<T> = Arc<dyn Condition<T>>;

impl<T, C: Condition<T> + ?Sized> Condition<T> for Box<C> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        (**self).test(ctx)
    }
}

impl<T, C: Condition<T> + ?Sized> Condition<T> for Arc<C> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        (**self).test(ctx)
    }
}

impl<T, C: Condition<T> + ?Sized> Condition<T> for &C {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        (**self).test(ctx)
    }
}

/// Matches if all of the sub-conditions match.
pub struct And<T> {
    conds: Vec<BoxCondition<T>>,
}

impl<T> And<T> {
    /// Builds a conjunction.
    ///
    /// Returns [`ConditionError::EmptyCondition`] if `conds` is empty.
    pub fn new<I>(conds: I) -> Result<Self>
    where
        I: IntoIterator<Item = BoxCondition<T>>,
    {
        let conds = non_empty("and", conds)?;
        Ok(And { conds })
    }

    /// The sub-conditions, in evaluation order.
    pub fn conditions(&self) -> &[BoxCondition<T>] {
        &self.conds
    }
}

impl<T> Condition<T> for And<T> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        self.conds.iter().all(|cond| cond.test(ctx))
    }
}

/// Matches if any of the sub-conditions matches.
pub struct Or<T> {
    conds: Vec<BoxCondition<T>>,
}

impl<T> Or<T> {
    /// Builds a disjunction.
    ///
    /// Returns [`ConditionError::EmptyCondition`] if `conds` is empty.
    pub fn new<I>(conds: I) -> Result<Self>
    where
        I: IntoIterator<Item = BoxCondition<T>>,
    {
        let conds = non_empty("or", conds)?;
        Ok(Or { conds })
    }

    /// The sub-conditions, in evaluation order.
    pub fn conditions(&self) -> &[BoxCondition<T>] {
        &self.conds
    }
}

impl<T> Condition<T> for Or<T> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        self.conds.iter().any(|cond| cond.test(ctx))
    }
}

fn non_empty<T, I>(kind: &str, conds: I) -> Result<Vec<BoxCondition<T>>>
where
    I: IntoIterator<Item = BoxCondition<T>>,
{
    let conds: Vec<BoxCondition<T>> = conds.into_iter().collect();
    if conds.is_empty() {
        log::debug!("rejected `{kind}` condition without sub-conditions");
        return Err(ConditionError::EmptyCondition);
    }
    Ok(conds)
}

/// Negates the sub-condition's result.
#[derive(Debug, Clone)]
pub struct Not<C>(pub C);

impl<C> Not<C> {
    pub fn new(cond: C) -> Self {
        Not(cond)
    }
}

impl<T, C: Condition<T>> Condition<T> for Not<C> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        !self.0.test(ctx)
    }
}

/// Matches if the current element satisfies a predicate.
///
/// # Example
///
/// ```
/// use condmap::{Check, ConditionExt};
///
/// let big = Check::new(|x: &i64| *x > 350);
/// assert_eq!(big.positions(&[399, 71, 439]), vec![0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Check<P> {
    predicate: P,
}

impl<P> Check<P> {
    pub fn new(predicate: P) -> Self {
        Check { predicate }
    }
}

impl<T, P: Predicate<T>> Condition<T> for Check<P> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        self.predicate.eval(ctx.current_value())
    }
}

/// Matches if a field of the current element satisfies a predicate.
///
/// The path is split on `.`; each segment names a record field or a map
/// key, stepping through one pointer indirection first. If any segment
/// cannot be resolved the condition is simply `false`.
///
/// # Example
///
/// ```
/// use condmap::{eq, ConditionExt, FieldCheck, Value};
/// use serde_json::json;
///
/// let rows = vec![
///     Value::from(json!({"user": {"name": "john"}})),
///     Value::from(json!({"user": "john"})),
/// ];
///
/// let named_john = FieldCheck::new("user.name", eq("john"));
/// assert_eq!(named_john.positions(&rows), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct FieldCheck<P> {
    segments: Vec<String>,
    predicate: P,
}

impl<P> FieldCheck<P> {
    pub fn new(path: &str, predicate: P) -> Self {
        FieldCheck {
            segments: path.split('.').map(str::to_string).collect(),
            predicate,
        }
    }

    /// The path segments, in resolution order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl<T, P> Condition<T> for FieldCheck<P>
where
    T: Inspect,
    P: Predicate<Value>,
{
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        resolve_path(ctx.current_value(), &self.segments)
            .is_some_and(|value| self.predicate.eval(&value))
    }
}

/// Builds an [`And`] from boxed conditions.
pub fn and<T>(conds: impl IntoIterator<Item = BoxCondition<T>>) -> Result<And<T>> {
    And::new(conds)
}

/// Builds an [`Or`] from boxed conditions.
pub fn or<T>(conds: impl IntoIterator<Item = BoxCondition<T>>) -> Result<Or<T>> {
    Or::new(conds)
}

pub fn not<C>(cond: C) -> Not<C> {
    Not::new(cond)
}

pub fn check<P>(predicate: P) -> Check<P> {
    Check::new(predicate)
}

pub fn field_check<P>(path: &str, predicate: P) -> FieldCheck<P> {
    FieldCheck::new(path, predicate)
}

/// Convenience methods available on every condition.
///
/// Besides erasing and negating conditions, this runs a single condition
/// over a whole sequence, the way a [`Mapping`](crate::Mapping) would.
pub trait ConditionExt<T>: Condition<T> {
    /// Erases the condition's type into a [`BoxCondition`].
    fn boxed(self) -> BoxCondition<T>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }

    /// Erases the condition's type into a [`SharedCondition`].
    fn shared(self) -> SharedCondition<T>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }

    fn negate(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }

    /// Tests the position `index` of `values`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    fn test_at(&self, values: &[T], index: usize) -> bool {
        self.test(&MatchContext::new(values, index))
    }

    /// Indices of all matching positions, in order.
    fn positions(&self, values: &[T]) -> Vec<usize> {
        (0..values.len())
            .filter(|&i| self.test_at(values, i))
            .collect()
    }

    /// References to all matching elements, in order.
    fn filter<'a>(&self, values: &'a [T]) -> Vec<&'a T> {
        values
            .iter()
            .enumerate()
            .filter(|(i, _)| self.test_at(values, *i))
            .map(|(_, value)| value)
            .collect()
    }

    /// Counts matching positions.
    fn count(&self, values: &[T]) -> usize {
        (0..values.len()).filter(|&i| self.test_at(values, i)).count()
    }

    /// Returns `true` if any position matches.
    fn any(&self, values: &[T]) -> bool {
        (0..values.len()).any(|i| self.test_at(values, i))
    }

    /// Returns `true` if every position matches.
    fn all(&self, values: &[T]) -> bool {
        (0..values.len()).all(|i| self.test_at(values, i))
    }

    /// The first matching element.
    fn find<'a>(&self, values: &'a [T]) -> Option<&'a T> {
        (0..values.len())
            .find(|&i| self.test_at(values, i))
            .map(|i| &values[i])
    }
}

impl<T, C: Condition<T> + ?Sized> ConditionExt<T> for C {}
