//! High-level API for radius-neighbors models.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring a radius-neighbors model over a reference
//! dataset.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all
//!   parameters.
//! * **Validated**: All parameters are validated when `build()` is called;
//!   a constructed model holds only checked configuration.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Configuration Flow**: `RadiusNeighborsBuilder::new()` → chained
//!   setters → `build(&data, dimensions)` → [`RadiusNeighbors`].
//! * **Collaborator injection**: A custom spatial index or worker pool may
//!   be supplied; by default the builder installs the exhaustive
//!   [`LinearIndex`] and, when parallelism is enabled, the process-scoped
//!   shared pool.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::engine::dispatch::DEF_CHUNK_MIN;
use crate::engine::executor::RadiusNeighbors;
use crate::engine::validator::Validator;
use crate::math::neighborhood::LinearIndex;
use crate::primitives::pool::WorkerPool;

// Publicly re-exported types
pub use crate::engine::executor::FittedRadius;
pub use crate::evaluation::postfit::RowSummary;
pub use crate::evaluation::report::ModelSummary;
pub use crate::math::distance::DistanceMetric;
pub use crate::math::neighborhood::{Neighborhood, SpatialIndex};
pub use crate::primitives::errors::RadiusError;

/// Default query radius, matching the classic model default.
pub const DEF_RADIUS: f64 = 5.0;

/// Default leaf size handed to index builders.
pub const DEF_LEAF_SIZE: usize = 30;

/// Fluent builder for configuring a radius-neighbors model.
#[derive(Debug, Clone)]
pub struct RadiusNeighborsBuilder<T: Float + Debug + Send + Sync + 'static> {
    /// Query radius (> 0).
    pub radius: Option<T>,

    /// Distance metric for the reference index.
    pub metric: Option<DistanceMetric<T>>,

    /// Leaf size for index builders.
    pub leaf_size: Option<usize>,

    /// Minimum rows per parallel chunk.
    pub chunk_min: Option<usize>,

    /// Whether queries use the parallel path.
    pub parallel: Option<bool>,

    /// Whether inputs were pre-scaled upstream (recorded for reporting).
    pub scale: Option<bool>,

    /// Worker pool for parallel queries.
    pub pool: Option<Arc<WorkerPool>>,

    /// Custom spatial index, replacing the default exhaustive scan.
    #[doc(hidden)]
    pub custom_index: Option<Arc<dyn SpatialIndex<T>>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Debug + Send + Sync + 'static> Default for RadiusNeighborsBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Debug + Send + Sync + 'static> RadiusNeighborsBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            radius: None,
            metric: None,
            leaf_size: None,
            chunk_min: None,
            parallel: None,
            scale: None,
            pool: None,
            custom_index: None,
            duplicate_param: None,
        }
    }

    /// Set the query radius (must be positive and finite).
    pub fn radius(mut self, radius: T) -> Self {
        if self.radius.is_some() {
            self.duplicate_param = Some("radius");
        }
        self.radius = Some(radius);
        self
    }

    /// Set the distance metric used by the reference index.
    pub fn metric(mut self, metric: DistanceMetric<T>) -> Self {
        if self.metric.is_some() {
            self.duplicate_param = Some("metric");
        }
        self.metric = Some(metric);
        self
    }

    /// Set the leaf size handed to index builders.
    pub fn leaf_size(mut self, leaf_size: usize) -> Self {
        if self.leaf_size.is_some() {
            self.duplicate_param = Some("leaf_size");
        }
        self.leaf_size = Some(leaf_size);
        self
    }

    /// Set the minimum number of rows per parallel chunk.
    pub fn chunk_min(mut self, chunk_min: usize) -> Self {
        if self.chunk_min.is_some() {
            self.duplicate_param = Some("chunk_min");
        }
        self.chunk_min = Some(chunk_min);
        self
    }

    /// Enable or disable the parallel query path.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Record that inputs were scaled upstream. Reporting only; this crate
    /// never normalizes data itself.
    pub fn scale(mut self, scale: bool) -> Self {
        if self.scale.is_some() {
            self.duplicate_param = Some("scale");
        }
        self.scale = Some(scale);
        self
    }

    /// Supply the worker pool parallel queries run on. Without this, the
    /// process-scoped shared pool is used.
    pub fn worker_pool(mut self, pool: Arc<WorkerPool>) -> Self {
        if self.pool.is_some() {
            self.duplicate_param = Some("worker_pool");
        }
        self.pool = Some(pool);
        self
    }

    /// Supply a custom spatial index over the reference data, replacing
    /// the default exhaustive scan.
    #[doc(hidden)]
    pub fn custom_index(mut self, index: Arc<dyn SpatialIndex<T>>) -> Self {
        self.custom_index = Some(index);
        self
    }

    /// Validate the configuration and construct a model over `data`.
    ///
    /// `data` is the flattened row-major reference dataset with
    /// `dimensions` values per row. The dataset is copied; the model owns
    /// its reference data immutably.
    pub fn build(self, data: &[T], dimensions: usize) -> Result<RadiusNeighbors<T>, RadiusError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let radius = match self.radius {
            Some(r) => r,
            None => T::from(DEF_RADIUS).ok_or(RadiusError::InvalidRadius(DEF_RADIUS))?,
        };
        Validator::validate_radius(radius)?;

        let leaf_size = self.leaf_size.unwrap_or(DEF_LEAF_SIZE);
        Validator::validate_leaf_size(leaf_size)?;

        let chunk_min = self.chunk_min.unwrap_or(DEF_CHUNK_MIN);
        Validator::validate_chunk_min(chunk_min)?;

        Validator::validate_dataset(data, dimensions)?;

        let metric = self.metric.unwrap_or_default();
        let parallel = self.parallel.unwrap_or(false);
        let scale = self.scale.unwrap_or(false);

        let index: Arc<dyn SpatialIndex<T>> = match self.custom_index {
            Some(index) => index,
            None => Arc::new(LinearIndex::new(data.to_vec(), dimensions, metric.clone())),
        };

        Ok(RadiusNeighbors::from_config(
            data.to_vec(),
            dimensions,
            radius,
            leaf_size,
            chunk_min,
            parallel,
            scale,
            metric,
            index,
            self.pool,
        ))
    }
}
