//! The unit of evaluation for conditions.

/// A read-only view of a sequence anchored at one position.
///
/// Contexts are cheap to copy: they hold a borrowed slice and an index.
/// Lookaround derives new contexts over the same slice with [`at`](Self::at).
#[derive(Debug)]
pub struct MatchContext<'a, T> {
    values: &'a [T],
    index: usize,
}

impl<T> Clone for MatchContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchContext<'_, T> {}

impl<'a, T> MatchContext<'a, T> {
    /// Creates a context over `values` at `index`.
    ///
    /// The index is not checked; only [`current_value`](Self::current_value)
    /// relies on it being in bounds.
    pub fn new(values: &'a [T], index: usize) -> Self {
        MatchContext { values, index }
    }

    /// The element at the current index.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the sequence.
    pub fn current_value(&self) -> &'a T {
        &self.values[self.index]
    }

    /// The element at the current index, or `None` if out of bounds.
    pub fn get(&self) -> Option<&'a T> {
        self.values.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The whole sequence, regardless of the current index.
    pub fn values(&self) -> &'a [T] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A context over the same sequence at another index.
    pub fn at(&self, index: usize) -> Self {
        MatchContext {
            values: self.values,
            index,
        }
    }
}
