//! Input validation for model configuration and query data.
//!
//! ## Purpose
//!
//! This module provides validation functions for radius-neighbors
//! configuration parameters and input data: radius bounds, dataset and
//! query shape, finiteness, and dispatch thresholds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not perform queries itself.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RadiusError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for radius-neighbors configuration and input data.
///
/// Provides static methods returning `Result<(), RadiusError>` that fail
/// fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the reference dataset: non-empty, whole rows, finite values.
    pub fn validate_dataset<T: Float>(data: &[T], dimensions: usize) -> Result<(), RadiusError> {
        if data.is_empty() {
            return Err(RadiusError::EmptyInput);
        }
        Self::validate_shape(data, dimensions)?;
        Self::validate_finite(data, "data")
    }

    /// Validate a query batch: whole rows, finite values. Empty batches are
    /// allowed and produce an empty neighborhood.
    pub fn validate_query<T: Float>(points: &[T], dimensions: usize) -> Result<(), RadiusError> {
        Self::validate_shape(points, dimensions)?;
        Self::validate_finite(points, "points")
    }

    /// Check that a flattened array divides into whole rows.
    fn validate_shape<T>(data: &[T], dimensions: usize) -> Result<(), RadiusError> {
        if dimensions == 0 || data.len() % dimensions != 0 {
            return Err(RadiusError::MismatchedShape {
                len: data.len(),
                dimensions,
            });
        }
        Ok(())
    }

    /// Check every value is finite (no NaN/Inf).
    fn validate_finite<T: Float>(data: &[T], name: &str) -> Result<(), RadiusError> {
        for (i, &val) in data.iter().enumerate() {
            if !val.is_finite() {
                return Err(RadiusError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the query radius: positive and finite.
    pub fn validate_radius<T: Float>(radius: T) -> Result<(), RadiusError> {
        if !radius.is_finite() || radius <= T::zero() {
            return Err(RadiusError::InvalidRadius(
                radius.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the leaf size handed to index builders.
    pub fn validate_leaf_size(leaf_size: usize) -> Result<(), RadiusError> {
        if leaf_size == 0 {
            return Err(RadiusError::InvalidLeafSize(leaf_size));
        }
        Ok(())
    }

    /// Validate the minimum chunk size for parallel dispatch.
    pub fn validate_chunk_min(chunk_min: usize) -> Result<(), RadiusError> {
        if chunk_min == 0 {
            return Err(RadiusError::InvalidChunkMin(chunk_min));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), RadiusError> {
        if let Some(param) = duplicate_param {
            return Err(RadiusError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
