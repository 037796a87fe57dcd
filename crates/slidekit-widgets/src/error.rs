#![forbid(unsafe_code)]

//! Errors raised by slider configuration calls.
//!
//! Out-of-range input is never an error: values are clamped. Only structural
//! misuse (wrong handle counts, bad indexes) and unrepresentable float
//! scales are rejected, and a rejected call leaves the slider untouched.

use thiserror::Error;

/// Fewest handles a range slider accepts.
pub const MIN_HANDLES: usize = 2;

/// Error type for slider operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// A whole-sequence assignment did not match the current handle count.
    #[error("expected {expected} handle values, got {actual}")]
    HandleCountMismatch { expected: usize, actual: usize },

    /// A per-handle operation named a handle that does not exist.
    #[error("handle index {index} out of range for {count} handles")]
    HandleIndexOutOfRange { index: usize, count: usize },

    /// A range slider needs a first and a last handle.
    #[error("a range slider needs at least {MIN_HANDLES} handles, got {count}")]
    TooFewHandles { count: usize },

    /// The requested decimal scale cannot represent the current range.
    #[error(
        "{decimals} decimals cannot represent the range [{minimum}, {maximum}] in a 64-bit integer"
    )]
    DecimalsOverflow {
        decimals: i32,
        minimum: f64,
        maximum: f64,
    },
}

/// Result alias for slider operations.
pub type Result<T> = std::result::Result<T, SliderError>;
