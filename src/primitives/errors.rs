//! Error types for radius-neighbors queries.
//!
//! ## Purpose
//!
//! This module defines the crate-wide error enum returned by every
//! fallible operation: builder validation, fitting, and querying.
//!
//! ## Design notes
//!
//! * **Single enum**: One error type for the whole crate; callers match on
//!   variants rather than downcasting.
//! * **Recoverable vs. fatal**: `PoolSaturated` is a control-flow signal
//!   consumed internally by the serial fallback; it only escapes through
//!   the dispatcher's own API, never through the model's query methods.
//!
//! ## Non-goals
//!
//! * This module does not log; callers decide severity at the site of
//!   failure.

use core::fmt;

/// Errors produced by radius-neighbors construction, fitting, and queries.
#[derive(Debug, Clone, PartialEq)]
pub enum RadiusError {
    /// The reference dataset is empty.
    EmptyInput,

    /// A flattened point array is not a whole number of rows.
    MismatchedShape {
        /// Length of the flattened array.
        len: usize,
        /// Configured number of dimensions per row.
        dimensions: usize,
    },

    /// A non-finite value (NaN or infinity) was found in the input.
    InvalidNumericValue(String),

    /// Radius is non-positive or non-finite.
    InvalidRadius(f64),

    /// Leaf size threshold is zero.
    InvalidLeafSize(usize),

    /// Minimum chunk size for parallel dispatch is zero.
    InvalidChunkMin(usize),

    /// A builder parameter was configured more than once.
    DuplicateParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
    },

    /// A query was issued before `fit()` completed.
    ModelNotFit,

    /// The worker pool refused a dispatch submission (saturation).
    PoolSaturated {
        /// Submissions in flight at the time of rejection.
        pending: usize,
        /// Admission capacity of the pool.
        capacity: usize,
    },

    /// A dedicated worker pool could not be constructed.
    PoolUnavailable(String),

    /// The spatial index ran out of memory while answering a query.
    OutOfMemory(String),

    /// Any other failure reported by a spatial index implementation.
    Index(String),
}

impl fmt::Display for RadiusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedShape { len, dimensions } => write!(
                f,
                "Shape mismatch: {} values cannot form rows of {} dimensions",
                len, dimensions
            ),
            Self::InvalidNumericValue(what) => {
                write!(f, "Invalid numeric value: {}", what)
            }
            Self::InvalidRadius(r) => {
                write!(f, "Invalid radius: {} (must be positive and finite)", r)
            }
            Self::InvalidLeafSize(got) => {
                write!(f, "Invalid leaf_size: {} (must be at least 1)", got)
            }
            Self::InvalidChunkMin(got) => {
                write!(f, "Invalid chunk_min: {} (must be at least 1)", got)
            }
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
            Self::ModelNotFit => write!(f, "Model has not been fit yet"),
            Self::PoolSaturated { pending, capacity } => write!(
                f,
                "Worker pool saturated: {} submissions in flight (capacity {})",
                pending, capacity
            ),
            Self::PoolUnavailable(why) => {
                write!(f, "Worker pool unavailable: {}", why)
            }
            Self::OutOfMemory(context) => {
                write!(f, "Out of memory: {}", context)
            }
            Self::Index(why) => write!(f, "Spatial index error: {}", why),
        }
    }
}

impl std::error::Error for RadiusError {}
