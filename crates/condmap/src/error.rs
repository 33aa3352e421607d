//! Error types for the condmap crate.

use thiserror::Error;

/// Errors raised while building conditions.
///
/// Evaluation never fails: a condition that cannot make sense of an element
/// simply does not match it. Every variant here therefore describes a
/// condition that could not be constructed.
#[derive(Debug, Error)]
pub enum ConditionError {
    /// `And` or `Or` was given no sub-conditions.
    #[error("empty condition")]
    EmptyCondition,

    /// Lookaround interval of zero.
    #[error("invalid interval")]
    InvalidInterval,

    /// Negative lookaround max distance.
    #[error("invalid max distance")]
    InvalidMaxDistance,

    /// Negative lookaround start distance.
    #[error("invalid start distance")]
    InvalidStartDistance,

    /// Start distance beyond a nonzero max distance.
    #[error("invalid max or start distance")]
    InvalidMaxOrStartDistance,

    /// Invalid regular expression pattern.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Result type for condmap operations.
pub type Result<T> = std::result::Result<T, ConditionError>;
