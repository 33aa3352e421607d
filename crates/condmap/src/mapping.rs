//! The mapping driver.
//!
//! A [`Mapping`] holds an ordered list of [`Entry`] values, each pairing a
//! condition with a [`Mapper`], and applies them across a sequence.
//!
//! # Semantics
//!
//! ```text
//! for each position i, in order:
//!     for each entry e, in declaration order:
//!         if e.cond holds at i over the whole sequence:
//!             emit e.mapper(values[i])
//! ```
//!
//! - Conditions always see the complete input, never a filtered view
//! - A position matching several entries emits several outputs (fan-out)
//! - A position matching nothing emits nothing
//!
//! Mapping costs O(n·m) condition tests for n elements and m entries. When
//! every condition is a plain equality, a `HashMap` lookup is faster.

use std::fmt;

use crate::condition::{BoxCondition, Condition};
use crate::context::MatchContext;

/// Produces an output value from a matched element.
pub trait Mapper<T, U>: Send + Sync {
    fn map(&self, value: &T) -> U;
}

impl<T, U, F> Mapper<T, U> for F
where
    F: Fn(&T) -> U + Send + Sync,
{
    fn map(&self, value: &T) -> U {
        self(value)
    }
}

/// A mapper that ignores its input and returns a clone of a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant<U>(pub U);

impl<T, U: Clone + Send + Sync> Mapper<T, U> for Constant<U> {
    fn map(&self, _value: &T) -> U {
        self.0.clone()
    }
}

/// Builds a [`Constant`] mapper.
pub fn constant<U>(value: U) -> Constant<U> {
    Constant(value)
}

/// A condition paired with the mapper applied to elements it matches.
pub struct Entry<T, U> {
    cond: BoxCondition<T>,
    mapper: Box<dyn Mapper<T, U>>,
}

impl<T, U> Entry<T, U> {
    pub fn new<C, M>(cond: C, mapper: M) -> Self
    where
        C: Condition<T> + 'static,
        M: Mapper<T, U> + 'static,
    {
        Entry {
            cond: Box::new(cond),
            mapper: Box::new(mapper),
        }
    }

    /// The condition to satisfy.
    pub fn condition(&self) -> &dyn Condition<T> {
        self.cond.as_ref()
    }

    /// The mapper producing the output value.
    pub fn mapper(&self) -> &dyn Mapper<T, U> {
        self.mapper.as_ref()
    }

    fn emit(&self, ctx: &MatchContext<'_, T>) -> Option<U> {
        self.cond
            .test(ctx)
            .then(|| self.mapper.map(ctx.current_value()))
    }
}

impl<T, U> fmt::Debug for Entry<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").finish_non_exhaustive()
    }
}

/// An ordered list of conditional entries.
///
/// # Example
///
/// ```
/// use condmap::{constant, eq, gt, Check, Mapping};
///
/// let mut mapping: Mapping<i64, &str> = Mapping::new();
/// mapping
///     .set(Check::new(eq(70)), constant("seventy"))
///     .set(Check::new(gt(100)), |x: &i64| if *x > 500 { "huge" } else { "big" });
///
/// let mapped = mapping.map_slice(&[70i64, 300, 5, 1000]);
/// assert_eq!(mapped, vec!["seventy", "big", "huge"]);
/// ```
pub struct Mapping<T, U> {
    entries: Vec<Entry<T, U>>,
}

impl<T, U> Default for Mapping<T, U> {
    fn default() -> Self {
        Mapping {
            entries: Vec::new(),
        }
    }
}

impl<T, U> Mapping<T, U> {
    /// Creates a new empty mapping.
    pub fn new() -> Self {
        Mapping::default()
    }

    /// Creates a mapping with the given entries, in order.
    pub fn with_entries(entries: Vec<Entry<T, U>>) -> Self {
        Mapping { entries }
    }

    /// Appends an entry built from a condition and a mapper.
    pub fn set<C, M>(&mut self, cond: C, mapper: M) -> &mut Self
    where
        C: Condition<T> + 'static,
        M: Mapper<T, U> + 'static,
    {
        self.push(Entry::new(cond, mapper))
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: Entry<T, U>) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// The entries, in declaration order.
    pub fn entries(&self) -> &[Entry<T, U>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maps a slice through every entry.
    ///
    /// Outputs are ordered by position first, then by entry declaration
    /// order.
    pub fn map_slice(&self, values: &[T]) -> Vec<U> {
        let mut mapped = Vec::new();

        for index in 0..values.len() {
            let ctx = MatchContext::new(values, index);
            mapped.extend(self.entries.iter().filter_map(|entry| entry.emit(&ctx)));
        }

        log::trace!(
            "mapped {} elements through {} entries into {} outputs",
            values.len(),
            self.entries.len(),
            mapped.len()
        );
        mapped
    }

    /// Lazily produces the same outputs as [`map_slice`](Self::map_slice).
    pub fn map_iter<'a>(&'a self, values: &'a [T]) -> impl Iterator<Item = U> + 'a {
        (0..values.len()).flat_map(move |index| {
            let ctx = MatchContext::new(values, index);
            self.entries
                .iter()
                .filter_map(move |entry| entry.emit(&ctx))
        })
    }

    /// Indices of the entries matching position `index`, in declaration
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn matching_entries(&self, values: &[T], index: usize) -> Vec<usize> {
        let ctx = MatchContext::new(values, index);
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.cond.test(&ctx))
            .map(|(i, _)| i)
            .collect()
    }
}

impl<T, U> fmt::Debug for Mapping<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<T, U> FromIterator<Entry<T, U>> for Mapping<T, U> {
    fn from_iter<I: IntoIterator<Item = Entry<T, U>>>(iter: I) -> Self {
        Mapping::with_entries(iter.into_iter().collect())
    }
}

impl<T, U> Extend<Entry<T, U>> for Mapping<T, U> {
    fn extend<I: IntoIterator<Item = Entry<T, U>>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
