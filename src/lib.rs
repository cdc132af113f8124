//! # Radius Neighbors — fixed-radius neighborhood queries for Rust
//!
//! A radius-neighbors model: index a reference dataset once, then answer
//! "which reference points lie within a fixed distance of each query
//! point" for ad hoc batches, serially or in parallel. Fitting the model
//! queries the reference set against itself, removes each point's trivial
//! self-match, and records per-row distance statistics.
//!
//! **Key properties:**
//! - One-time, idempotent fit under concurrent access: exactly one caller
//!   computes, everyone shares the cached result
//! - Deterministic batch queries: output row *i* always answers input row
//!   *i*, whether the batch ran serially or chunked across a worker pool
//! - Transparent degradation: a saturated worker pool falls back to a
//!   serial search without surfacing an error
//!
//! **Common applications:**
//! - Density estimates and neighborhood counts at a fixed scale
//! - Region-of-influence lookups in low-dimensional spatial data
//! - Pre-computing adjacency for density-based clustering
//!
//! ## Quick Start
//!
//! ```rust
//! use radius_rs::prelude::*;
//!
//! // 1-D reference points, one value per row
//! let data = vec![0.0, 1.0, 2.0, 10.0];
//!
//! // Build the model
//! let model = RadiusNeighborsBuilder::new()
//!     .radius(1.5)
//!     .build(&data, 1)?;
//!
//! // Fit: self-query, self-exclusion, per-row statistics
//! let fitted = model.fit()?;
//! assert_eq!(fitted.neighborhood.indices[1], vec![0, 2]);
//!
//! // Ad hoc query at the configured radius
//! let hits = model.neighbors(&[1.9])?;
//! assert_eq!(hits.indices[0], vec![1, 2]);
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! ## Fitting
//!
//! `fit()` runs at most once per model. The raw self-query keeps each
//! point's own index in its row; the fit pass removes it (a stable filter)
//! and summarizes what remains: neighbor count, nearest, mean, and
//! farthest distance, plus the cumulative wall time when the row was
//! processed. Rows with no neighbors inside the radius report `None` for
//! the distance statistics — an isolated point has no mean distance.
//!
//! ```rust
//! use radius_rs::prelude::*;
//!
//! let data = vec![0.0, 1.0, 2.0, 10.0];
//! let model = RadiusNeighborsBuilder::new().radius(1.5).build(&data, 1)?;
//! let fitted = model.fit()?;
//!
//! let lonely = &fitted.summaries[3]; // 10.0 has no neighbors within 1.5
//! assert_eq!(lonely.count, 0);
//! assert_eq!(lonely.mean, None);
//!
//! let middle = &fitted.summaries[1]; // 1.0 sees 0.0 and 2.0
//! assert_eq!(middle.count, 2);
//! assert_eq!(middle.mean, Some(1.0));
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! Calling `fit()` again returns the identical cached result without
//! touching the index; concurrent callers during a fit block until the
//! single computation publishes, then read the same cache. A failed fit
//! publishes nothing and leaves the model unfitted, so a later attempt
//! starts clean.
//!
//! ## Querying
//!
//! Queries require a fitted model and return raw neighborhoods: no
//! self-exclusion (an ad hoc batch has no special relation to the
//! reference set) and no per-row ordering guarantee.
//!
//! ```rust
//! use radius_rs::prelude::*;
//!
//! let data = vec![0.0, 1.0, 2.0, 10.0];
//! let model = RadiusNeighborsBuilder::new().radius(1.5).build(&data, 1)?;
//! model.fit()?;
//!
//! // Configured radius
//! let near = model.neighbors(&[0.4, 9.0])?;
//! assert_eq!(near.indices[0], vec![0, 1]);
//! assert_eq!(near.indices[1], vec![3]);
//!
//! // Explicit radius per call
//! let wide = model.neighbors_within(&[0.4], 10.0)?;
//! assert_eq!(wide.indices[0], vec![0, 1, 2, 3]);
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! ## Parallel Queries
//!
//! With `.parallel(true)`, batches split recursively into contiguous row
//! chunks (down to `chunk_min` rows) and run on a bounded worker pool; the
//! chunk results are concatenated back in input order, so parallel and
//! serial runs are bit-identical. If the pool refuses the batch, the model
//! logs a warning and runs the same query serially — the caller never sees
//! the rejection.
//!
//! ```rust
//! use radius_rs::prelude::*;
//!
//! let data: Vec<f64> = (0..256).map(|i| i as f64).collect();
//! let queries: Vec<f64> = (0..64).map(|i| (i * 4) as f64).collect();
//!
//! let serial = RadiusNeighborsBuilder::new()
//!     .radius(3.0)
//!     .build(&data, 1)?;
//! let parallel = RadiusNeighborsBuilder::new()
//!     .radius(3.0)
//!     .parallel(true)
//!     .chunk_min(8)
//!     .build(&data, 1)?;
//!
//! serial.fit()?;
//! parallel.fit()?;
//! assert_eq!(serial.neighbors(&queries)?, parallel.neighbors(&queries)?);
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! By default parallel models share one process-scoped pool; pass your own
//! via `.worker_pool(...)` to isolate workloads:
//!
//! ```rust
//! use radius_rs::prelude::*;
//! use std::sync::Arc;
//!
//! let pool = Arc::new(WorkerPool::new(2, 16)?);
//! let data = vec![0.0, 1.0, 2.0, 3.0];
//!
//! let model = RadiusNeighborsBuilder::new()
//!     .radius(1.5)
//!     .parallel(true)
//!     .worker_pool(pool)
//!     .build(&data, 1)?;
//! model.fit()?;
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! All builder parameters have defaults; configure only what you need.
//!
//! | Parameter      | Default     | Range        | Description                                   |
//! |----------------|-------------|--------------|-----------------------------------------------|
//! | **radius**     | 5.0         | (0, ∞)       | Query radius (inclusive boundary)             |
//! | **metric**     | `Euclidean` | 4 metrics    | Distance metric for the reference index       |
//! | **leaf_size**  | 30          | [1, ∞)       | Leaf size handed to index builders            |
//! | **chunk_min**  | 500         | [1, ∞)       | Minimum rows per parallel chunk               |
//! | **parallel**   | false       | true/false   | Route batch queries through the worker pool   |
//! | **scale**      | false       | true/false   | Inputs were pre-scaled upstream (recorded)    |
//! | **worker_pool**| shared pool | —            | Pool for parallel queries                     |
//!
//! Metrics: `Euclidean`, `Manhattan`, `Chebyshev`, `Minkowski(p)`.
//!
//! ## Result and Error Handling
//!
//! Every fallible operation returns `Result<_, RadiusError>`; the `?`
//! operator is idiomatic:
//!
//! ```rust
//! use radius_rs::prelude::*;
//!
//! let data = vec![0.0, 1.0];
//! let model = RadiusNeighborsBuilder::new().radius(1.0).build(&data, 1)?;
//!
//! // Querying before fit fails
//! assert!(matches!(
//!     model.neighbors(&[0.5]),
//!     Err(RadiusError::ModelNotFit)
//! ));
//!
//! model.fit()?;
//!
//! // A non-positive radius fails without computing anything
//! assert!(matches!(
//!     model.neighbors_within(&[0.5], 0.0),
//!     Err(RadiusError::InvalidRadius(_))
//! ));
//! # Result::<(), RadiusError>::Ok(())
//! ```
//!
//! A worker-pool rejection is the one failure callers never observe: it is
//! logged at warn level and recovered by the serial fallback.
//!
//! ## Concurrency Model
//!
//! The reference dataset and the published fit result are immutable and
//! safely shared without locking. Fit-time mutation is confined to the
//! single guarded computation. Parallel chunk tasks read disjoint row
//! ranges of the same batch and produce disjoint output rows, so no data
//! race exists between them. There is no mid-flight cancellation; the only
//! resilience path is the pre-execution fallback from a rejected dispatch
//! to a serial call.
//!
//! ## Custom Indexes
//!
//! The engine consumes its spatial index through the [`SpatialIndex`]
//! trait and ships an exhaustive [`LinearIndex`] as the reference
//! implementation. Sublinear structures (trees, grids) can be supplied by
//! implementing the trait and injecting via the builder.
//!
//! [`SpatialIndex`]: crate::prelude::SpatialIndex
//! [`LinearIndex`]: crate::prelude::LinearIndex

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - errors and the bounded worker pool.
//
// Contains the crate-wide error type and the admission-controlled rayon
// pool that parallel queries run on.
mod primitives;

// Layer 2: Math - distance metrics and the index seam.
//
// Contains distance metrics, the Neighborhood result container, the
// SpatialIndex trait, and the exhaustive LinearIndex.
mod math;

// Layer 3: Evaluation - fit post-processing and reporting.
//
// Contains self-exclusion with per-row statistics and the summary types
// handed to reporting.
mod evaluation;

// Layer 4: Engine - orchestration and execution control.
//
// Contains validation, the parallel dispatcher with ordered merging, and
// the model with its guarded fit lifecycle.
mod engine;

// High-level fluent API for radius-neighbors models.
//
// Provides the RadiusNeighborsBuilder for configuring and constructing
// models.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard radius-neighbors prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use radius_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        DistanceMetric,
        DistanceMetric::{Chebyshev, Euclidean, Manhattan, Minkowski},
        FittedRadius, ModelSummary, Neighborhood, RadiusError, RadiusNeighborsBuilder, RowSummary,
        SpatialIndex, DEF_LEAF_SIZE, DEF_RADIUS,
    };
    pub use crate::engine::dispatch::DEF_CHUNK_MIN;
    pub use crate::engine::executor::RadiusNeighbors;
    pub use crate::math::neighborhood::LinearIndex;
    pub use crate::primitives::pool::{WorkerPool, DEF_POOL_CAPACITY};
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing
/// purposes. It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change
/// without notice. Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions and index implementations.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal fit post-processing and reporting.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
