//! Condmap - Position-aware conditions and conditional mapping over sequences.
//!
//! Condmap evaluates composable conditions against a position in a sequence
//! and maps the positions that match. It supports:
//!
//! - Element checks with equality, deep equality, length, ordering and regex
//! - Field checks through dotted paths into records, maps and structs
//! - Boolean combinators: AND, OR, NOT
//! - Lookaround: quantified scans over the elements before or after a position
//! - Mapping with fan-out: every matching entry emits an output
//!
//! # Quick Start
//!
//! ```rust
//! use condmap::{and, constant, eq, field_check, look_before_any, ConditionExt, Mapping, Record, Value};
//!
//! fn example(name: &str, message: &str) -> Value {
//!     Record::new("Example")
//!         .with_field("name", name)
//!         .with_field("message", message)
//!         .into()
//! }
//!
//! let entries = vec![
//!     example("john", "Example 1"),
//!     example("<placeholder>", "next fields follow"),
//!     example("john", "Example 3"),
//! ];
//!
//! let mut mapping: Mapping<Value, &str> = Mapping::new();
//! mapping.set(
//!     and([
//!         field_check("name", eq("john")).boxed(),
//!         look_before_any(field_check("name", eq("<placeholder>"))).boxed(),
//!     ])?,
//!     constant("after placeholder"),
//! );
//!
//! assert_eq!(mapping.map_slice(&entries), vec!["after placeholder"]);
//! # Ok::<(), condmap::ConditionError>(())
//! ```
//!
//! # Evaluation Semantics
//!
//! Every condition is tested against a [`MatchContext`]: the whole sequence
//! plus the index under test.
//!
//! | Condition | Holds when |
//! |-----------|------------|
//! | [`And`] | every sub-condition holds (short-circuits on the first failure) |
//! | [`Or`] | some sub-condition holds (short-circuits on the first success) |
//! | [`Not`] | the sub-condition does not hold |
//! | [`Check`] | the predicate holds for the current element |
//! | [`FieldCheck`] | the path resolves and the predicate holds for the field |
//! | [`Lookaround`] | the scanned window satisfies the inner condition (any or all) |
//!
//! Evaluation never fails. Malformed conditions are rejected when they are
//! built, with a [`ConditionError`].
//!
//! # Value Predicates
//!
//! | Predicate | Candidates |
//! |-----------|------------|
//! | [`eq`] | shallow equality: same kind and value, pointers by identity |
//! | [`deep_eq`] | recursive equality through lists, maps, records and pointers |
//! | [`len`] | lists, maps and strings (in characters) |
//! | [`gt`], [`gte`], [`lt`], [`lte`], [`ne`] | numbers across representations |
//! | [`starts_with`], [`ends_with`], [`contains`], [`matches_regex`] | strings |
//!
//! Any `Fn(&T) -> bool + Send + Sync` closure is a predicate too.
//!
//! # Features
//!
//! - `macros`: re-exports `#[derive(Inspect)]` from `condmap-macros`

mod condition;
mod context;
mod error;
mod inspect;
mod lookaround;
mod mapping;
mod op;
mod predicate;
mod value;

// Re-export public API
pub use condition::{
    and, check, field_check, not, or, And, BoxCondition, Check, Condition, ConditionExt,
    FieldCheck, Not, Or, SharedCondition,
};
pub use context::MatchContext;
pub use error::{ConditionError, Result};
pub use inspect::{resolve_path, Inspect, ToValue};
pub use lookaround::{
    look_after_all, look_after_any, look_before_all, look_before_any, lookaround, AnchoredFn,
    Lookaround, LookaroundBuilder, LookaroundOptions, Window,
};
pub use mapping::{constant, Constant, Entry, Mapper, Mapping};
pub use op::Op;
pub use predicate::{
    contains, deep_eq, ends_with, eq, gt, gte, len, lt, lte, matches_regex, ne, starts_with,
    Compare, DeepEq, Len, Matches, Predicate, ShallowEq,
};
pub use value::{Number, Record, Value};

#[cfg(feature = "macros")]
pub use condmap_macros::Inspect;
