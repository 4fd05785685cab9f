// src/error.rs
use core::fmt;

/// Library-wide error for rangemedian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedError {
    /// Median requested before any value was inserted.
    Empty,

    /// Estimator configured with a capacity of zero; the summary needs at
    /// least one entry to represent anything.
    InvalidCapacity { got: usize },

    /// Internal invariant violation (should never happen in release builds).
    Invariant { what: &'static str },
}

impl fmt::Display for MedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedError::Empty => write!(
                f,
                "rangemedian: median of an empty stream. \
hint: insert at least one value before querying"
            ),
            MedError::InvalidCapacity { got } => write!(
                f,
                "rangemedian: invalid capacity {} (must be >= 1). \
hint: the summary needs room for at least one entry",
                got
            ),
            MedError::Invariant { what } => {
                write!(f, "rangemedian: internal invariant violation: {}", what)
            }
        }
    }
}

impl std::error::Error for MedError {}

pub type MedResult<T> = Result<T, MedError>;
