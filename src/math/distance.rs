//! Distance metrics for radius queries.
//!
//! ## Purpose
//!
//! This module provides the distance computations the reference index uses
//! to decide whether a point falls inside a query radius. All metrics
//! operate on flattened nD points of equal dimensionality.
//!
//! ## Design notes
//!
//! * **Decoupling**: Metric selection is configuration; evaluation is a
//!   single `eval` dispatch so index implementations stay metric-agnostic.
//! * **No normalization**: Feature scaling happens upstream of this crate,
//!   so no scale-aware metric variants are provided.
//!
//! ## Invariants
//!
//! * Distance is always non-negative.
//! * Distance is zero if and only if points are identical (for metrics
//!   satisfying identity).
//!
//! ## Non-goals
//!
//! * This module does not prune or index anything; it only measures.

// External dependencies
use num_traits::Float;

// ============================================================================
// Distance Metric Enum
// ============================================================================

/// Distance metric for radius-neighborhood computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DistanceMetric<T> {
    /// Standard Euclidean distance: √(Σ(xᵢ - yᵢ)²)
    #[default]
    Euclidean,

    /// Manhattan distance (L1 norm): Σ|xᵢ - yᵢ|
    Manhattan,

    /// Chebyshev distance (L∞ norm): max|xᵢ - yᵢ|
    Chebyshev,

    /// Minkowski distance (Lp norm): (Σ|xᵢ - yᵢ|^p)^(1/p)
    /// Generalization of Euclidean (p=2) and Manhattan (p=1).
    /// p must be >= 1.0.
    Minkowski(T),
}

// ============================================================================
// Distance Computation Functions
// ============================================================================

impl<T: Float> DistanceMetric<T> {
    /// Evaluate this metric between two nD points.
    #[inline]
    pub fn eval(&self, a: &[T], b: &[T]) -> T {
        match self {
            Self::Euclidean => Self::euclidean(a, b),
            Self::Manhattan => Self::manhattan(a, b),
            Self::Chebyshev => Self::chebyshev(a, b),
            Self::Minkowski(p) => Self::minkowski(a, b, *p),
        }
    }

    /// Short name for summaries and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "Euclidean",
            Self::Manhattan => "Manhattan",
            Self::Chebyshev => "Chebyshev",
            Self::Minkowski(_) => "Minkowski",
        }
    }

    /// Compute Euclidean distance between two nD points.
    #[inline]
    pub fn euclidean(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len(), "Points must have same dimension");
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| {
                let diff = ai - bi;
                diff * diff
            })
            .fold(T::zero(), |acc, x| acc + x)
            .sqrt()
    }

    /// Compute Manhattan distance (L1 norm).
    #[inline]
    pub fn manhattan(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs())
            .fold(T::zero(), |acc, x| acc + x)
    }

    /// Compute Chebyshev distance (L-inf norm).
    #[inline]
    pub fn chebyshev(a: &[T], b: &[T]) -> T {
        debug_assert_eq!(a.len(), b.len());
        a.iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs())
            .fold(T::zero(), T::max)
    }

    /// Compute Minkowski distance (Lp norm).
    #[inline]
    pub fn minkowski(a: &[T], b: &[T], p: T) -> T {
        debug_assert_eq!(a.len(), b.len());
        let sum_pow = a
            .iter()
            .zip(b.iter())
            .map(|(&ai, &bi)| (ai - bi).abs().powf(p))
            .fold(T::zero(), |acc, x| acc + x);
        sum_pow.powf(T::one() / p)
    }
}
