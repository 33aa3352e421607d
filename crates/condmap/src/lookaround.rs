//! Windowed, quantified scans around the current position.
//!
//! A [`Lookaround`] asks whether the elements before or after the current
//! position satisfy an inner condition. The scan is described by four
//! settings, held in [`LookaroundOptions`]:
//!
//! | Setting | Meaning |
//! |---------|---------|
//! | `interval` | Signed step between scanned positions. Negative scans backward. Never zero. |
//! | `max_dist` | How far from the current index the window may reach. `0` is unbounded. |
//! | `start_dist` | Offset of the first scanned position. `0` means the adjacent element. |
//! | `all` | `false`: at least one scanned element matches. `true`: every scanned element matches, and at least one was scanned. |
//!
//! # Window
//!
//! For current index `i` over a sequence of length `n`:
//!
//! ```text
//! low   = max(0, i - max_dist)      (0 when max_dist == 0)
//! high  = min(n - 1, i + max_dist)  (n - 1 when max_dist == 0)
//! start = i - start_dist or i + start_dist, following the interval's sign
//!         (start_dist == 0 behaves as 1)
//! scan  = start, start + interval, ... while low <= j <= high
//! ```
//!
//! # Example
//!
//! ```
//! use condmap::{eq, lt, Check, ConditionExt, Lookaround};
//!
//! let values = [1000i64, 300, 70, 70, 300, 70, 300, 300, 70];
//!
//! // 70s with another small value at most two positions back.
//! let cond = condmap::and([
//!     Check::new(eq(70)).boxed(),
//!     Lookaround::before().max_dist(2).build(Check::new(lt(200)))?.boxed(),
//! ])?;
//!
//! assert_eq!(cond.positions(&values), vec![3, 5]);
//! # Ok::<(), condmap::ConditionError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, SharedCondition};
use crate::context::MatchContext;
use crate::error::{ConditionError, Result};

/// Scan settings for a [`Lookaround`].
///
/// Options can be deserialized from configuration; every field but
/// `interval` is optional.
///
/// ```
/// use condmap::LookaroundOptions;
///
/// let options: LookaroundOptions =
///     serde_json::from_str(r#"{"interval": -1, "max_dist": 3}"#).unwrap();
///
/// assert_eq!(options.start_dist, 0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookaroundOptions {
    /// Signed step between scanned positions.
    pub interval: isize,
    /// Maximum distance from the current index; `0` is unbounded.
    #[serde(default)]
    pub max_dist: isize,
    /// Distance of the first scanned position; `0` is adjacent.
    #[serde(default)]
    pub start_dist: isize,
    /// Require every scanned element to match.
    #[serde(default)]
    pub all: bool,
}

impl LookaroundOptions {
    /// Options with the given interval and default window and quantifier.
    pub fn new(interval: isize) -> Self {
        LookaroundOptions {
            interval,
            max_dist: 0,
            start_dist: 0,
            all: false,
        }
    }

    /// Checks the options, reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        let result = if self.interval == 0 {
            Err(ConditionError::InvalidInterval)
        } else if self.max_dist < 0 {
            Err(ConditionError::InvalidMaxDistance)
        } else if self.start_dist < 0 {
            Err(ConditionError::InvalidStartDistance)
        } else if self.max_dist != 0 && self.start_dist != 0 && self.start_dist > self.max_dist {
            Err(ConditionError::InvalidMaxOrStartDistance)
        } else {
            Ok(())
        };

        if let Err(err) = &result {
            log::debug!("rejected lookaround options {self:?}: {err}");
        }
        result
    }
}

/// Builds the condition tested against each scanned neighbor from the
/// element at the current position.
pub type AnchoredFn<T> = Box<dyn Fn(&T) -> SharedCondition<T> + Send + Sync>;

enum Inner<T> {
    Fixed(SharedCondition<T>),
    Anchored(AnchoredFn<T>),
}

/// Matches if the elements around the current position satisfy a condition.
pub struct Lookaround<T> {
    inner: Inner<T>,
    interval: isize,
    max_dist: usize,
    start_dist: usize,
    all: bool,
}

impl<T> Lookaround<T> {
    /// Starts a builder scanning with the given interval.
    pub fn builder(interval: isize) -> LookaroundBuilder<T> {
        LookaroundBuilder {
            options: LookaroundOptions::new(interval),
            _marker: PhantomData,
        }
    }

    /// Starts a builder scanning backward one element at a time.
    pub fn before() -> LookaroundBuilder<T> {
        Self::builder(-1)
    }

    /// Starts a builder scanning forward one element at a time.
    pub fn after() -> LookaroundBuilder<T> {
        Self::builder(1)
    }

    /// Builds a lookaround from validated options and a fixed condition.
    pub fn from_options<C>(options: LookaroundOptions, cond: C) -> Result<Self>
    where
        C: Condition<T> + 'static,
    {
        Self::from_parts(options, Inner::Fixed(std::sync::Arc::new(cond)))
    }

    /// Builds a lookaround whose inner condition depends on the current
    /// element.
    pub fn from_options_anchored<F>(options: LookaroundOptions, f: F) -> Result<Self>
    where
        F: Fn(&T) -> SharedCondition<T> + Send + Sync + 'static,
    {
        Self::from_parts(options, Inner::Anchored(Box::new(f)))
    }

    fn from_parts(options: LookaroundOptions, inner: Inner<T>) -> Result<Self> {
        options.validate()?;
        Ok(Lookaround {
            inner,
            interval: options.interval,
            max_dist: options.max_dist.unsigned_abs(),
            start_dist: options.start_dist.unsigned_abs(),
            all: options.all,
        })
    }

    /// The settings this lookaround was built with.
    pub fn options(&self) -> LookaroundOptions {
        LookaroundOptions {
            interval: self.interval,
            max_dist: self.max_dist as isize,
            start_dist: self.start_dist as isize,
            all: self.all,
        }
    }

    /// The positions scanned for the context's current index, in scan order.
    pub fn window(&self, ctx: &MatchContext<'_, T>) -> Window {
        let index = ctx.index() as isize;
        let last = ctx.len() as isize - 1;
        let max_dist = self.max_dist as isize;

        let (low, high) = if max_dist > 0 {
            (
                index.saturating_sub(max_dist).max(0),
                index.saturating_add(max_dist).min(last),
            )
        } else {
            (0, last)
        };

        let offset = self.start_dist.max(1) as isize;
        let start = if self.interval < 0 {
            index.saturating_sub(offset)
        } else {
            index.saturating_add(offset)
        };

        Window {
            next: Some(start),
            step: self.interval,
            low,
            high,
        }
    }
}

impl<T> Condition<T> for Lookaround<T> {
    fn test(&self, ctx: &MatchContext<'_, T>) -> bool {
        let anchored;
        let cond: &dyn Condition<T> = match &self.inner {
            Inner::Fixed(cond) => cond.as_ref(),
            Inner::Anchored(f) => {
                anchored = f(ctx.current_value());
                anchored.as_ref()
            }
        };

        let mut window = self.window(ctx);

        if !self.all {
            return window.any(|j| cond.test(&ctx.at(j)));
        }

        let mut scanned = false;
        for j in window {
            if !cond.test(&ctx.at(j)) {
                return false;
            }
            scanned = true;
        }
        scanned
    }
}

impl<T> fmt::Debug for Lookaround<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = match self.inner {
            Inner::Fixed(_) => "fixed",
            Inner::Anchored(_) => "anchored",
        };
        f.debug_struct("Lookaround")
            .field("inner", &inner)
            .field("interval", &self.interval)
            .field("max_dist", &self.max_dist)
            .field("start_dist", &self.start_dist)
            .field("all", &self.all)
            .finish()
    }
}

/// Iterator over the positions a [`Lookaround`] scans.
#[derive(Debug, Clone)]
pub struct Window {
    next: Option<isize>,
    step: isize,
    low: isize,
    high: isize,
}

impl Iterator for Window {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next.filter(|j| (self.low..=self.high).contains(j))?;
        self.next = current.checked_add(self.step);
        Some(current as usize)
    }
}

/// Validating builder for [`Lookaround`].
///
/// Setters can be called in any order; all checks run in `build`.
pub struct LookaroundBuilder<T> {
    options: LookaroundOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for LookaroundBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookaroundBuilder")
            .field("options", &self.options)
            .finish()
    }
}

impl<T> LookaroundBuilder<T> {
    /// The maximum distance from the current element.
    pub fn max_dist(mut self, max_dist: isize) -> Self {
        self.options.max_dist = max_dist;
        self
    }

    /// The distance to start scanning from the current element.
    pub fn start_dist(mut self, start_dist: isize) -> Self {
        self.options.start_dist = start_dist;
        self
    }

    /// Require all scanned elements to satisfy the condition.
    pub fn all(mut self, all: bool) -> Self {
        self.options.all = all;
        self
    }

    /// The settings collected so far, not yet validated.
    pub fn options(&self) -> LookaroundOptions {
        self.options
    }

    /// Builds the lookaround around a fixed condition.
    pub fn build<C>(self, cond: C) -> Result<Lookaround<T>>
    where
        C: Condition<T> + 'static,
    {
        Lookaround::from_options(self.options, cond)
    }

    /// Builds the lookaround around a condition derived from the current
    /// element.
    pub fn build_anchored<F>(self, f: F) -> Result<Lookaround<T>>
    where
        F: Fn(&T) -> SharedCondition<T> + Send + Sync + 'static,
    {
        Lookaround::from_options_anchored(self.options, f)
    }
}

/// Lookaround with an explicit interval and default window.
pub fn lookaround<T, C>(cond: C, interval: isize) -> Result<Lookaround<T>>
where
    C: Condition<T> + 'static,
{
    Lookaround::<T>::builder(interval).build(cond)
}

/// Matches if any element before the current one satisfies `cond`.
pub fn look_before_any<T, C: Condition<T> + 'static>(cond: C) -> Lookaround<T> {
    fixed(cond, -1, false)
}

/// Matches if every element before the current one satisfies `cond`.
pub fn look_before_all<T, C: Condition<T> + 'static>(cond: C) -> Lookaround<T> {
    fixed(cond, -1, true)
}

/// Matches if any element after the current one satisfies `cond`.
pub fn look_after_any<T, C: Condition<T> + 'static>(cond: C) -> Lookaround<T> {
    fixed(cond, 1, false)
}

/// Matches if every element after the current one satisfies `cond`.
pub fn look_after_all<T, C: Condition<T> + 'static>(cond: C) -> Lookaround<T> {
    fixed(cond, 1, true)
}

// Unit intervals with default distances always validate.
fn fixed<T, C: Condition<T> + 'static>(cond: C, interval: isize, all: bool) -> Lookaround<T> {
    Lookaround {
        inner: Inner::Fixed(std::sync::Arc::new(cond)),
        interval,
        max_dist: 0,
        start_dist: 0,
        all,
    }
}
