//! Radius-neighbors model: guarded fitting and query orchestration.
//!
//! ## Purpose
//!
//! This module provides the model that owns the reference dataset and the
//! configured radius, performs the one-time fit (reference set queried
//! against itself, self-matches removed, per-row statistics recorded), and
//! dispatches ad hoc batch queries either serially or through the parallel
//! dispatcher with transparent serial fallback.
//!
//! ## Design notes
//!
//! * **Compute once, guarded**: Fit state is an explicit tri-state
//!   (`Unfitted` → `Fitting` → `Fitted`) behind one mutex and condvar.
//!   The first caller computes; concurrent callers block until the result
//!   publishes, then read the cached value. A second `fit()` never touches
//!   the index again.
//! * **No partial publish**: The fitting thread holds no lock while
//!   computing; a reset guard returns the state to `Unfitted` on failure
//!   (including panic) and wakes all waiters, so a later `fit()` starts
//!   clean.
//! * **Invisible rejection**: When the worker pool refuses a parallel
//!   query, the engine logs a warning and retries serially. Callers never
//!   observe the rejection.
//! * **Raw ad hoc results**: Query results are not self-filtered; an ad
//!   hoc batch has no guaranteed relation to the reference set.
//!
//! ## Invariants
//!
//! * The fitted neighborhood's row *i* never contains index *i*.
//! * The published `FittedRadius` is immutable and shared by `Arc`.
//! * Query output row order equals input row order on both paths.
//!
//! ## Non-goals
//!
//! * This module does not build spatial indexes (injected collaborator).
//! * This module does not validate builder parameters (handled by `api`).

// External dependencies
use core::fmt::{self, Debug};
use core::time::Duration;
use num_traits::Float;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Instant;

// Internal dependencies
use crate::evaluation::postfit::{exclude_self, RowSummary};
use crate::evaluation::report::{write_fit_rows, ModelSummary};
use crate::math::distance::DistanceMetric;
use crate::math::neighborhood::{Neighborhood, SpatialIndex};
use crate::primitives::errors::RadiusError;
use crate::primitives::pool::WorkerPool;

use super::dispatch::ParallelDispatcher;
use super::validator::Validator;

// ============================================================================
// Fitted Result
// ============================================================================

/// Published product of a completed fit.
///
/// Holds the self-filtered neighborhood of the reference set, one summary
/// per row, and the total fit wall time. Immutable once published.
#[derive(Debug, Clone)]
pub struct FittedRadius<T> {
    /// Reference-set neighborhood with self-matches removed.
    pub neighborhood: Neighborhood<T>,

    /// Per-row statistics, in row order.
    pub summaries: Vec<RowSummary<T>>,

    /// Total wall time of the fit.
    pub elapsed: Duration,
}

impl<T: fmt::Display> fmt::Display for FittedRadius<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit summary ({} rows, {:.3?}):", self.summaries.len(), self.elapsed)?;
        write_fit_rows(f, &self.summaries)
    }
}

// ============================================================================
// Fit State
// ============================================================================

/// Tri-state fit lifecycle guarded by the model's mutex.
enum FitState<T> {
    /// No fit has completed; the next `fit()` computes.
    Unfitted,

    /// A fit is in flight; callers wait on the condvar.
    Fitting,

    /// The published result; all callers share this `Arc`.
    Fitted(Arc<FittedRadius<T>>),
}

/// Reverts `Fitting` to `Unfitted` and wakes waiters unless disarmed.
///
/// Installed for the duration of the unlocked computation so that an error
/// return or a panic cannot strand waiters on a permanent `Fitting` state.
struct FitReset<'a, T> {
    state: &'a Mutex<FitState<T>>,
    fitted: &'a Condvar,
    armed: bool,
}

impl<T> Drop for FitReset<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = FitState::Unfitted;
            self.fitted.notify_all();
        }
    }
}

// ============================================================================
// Radius Neighbors Model
// ============================================================================

/// Radius-neighbors model over an immutable reference dataset.
///
/// Construct through
/// [`RadiusNeighborsBuilder`](crate::api::RadiusNeighborsBuilder), then
/// call [`fit`](Self::fit) once and query with
/// [`neighbors`](Self::neighbors).
pub struct RadiusNeighbors<T: Float + 'static> {
    /// Flattened reference dataset, row-major. Immutable.
    data: Vec<T>,

    /// Number of reference rows.
    rows: usize,

    /// Values per row.
    dimensions: usize,

    /// Query radius. Positive and finite by construction.
    radius: T,

    /// Leaf size handed to index builders; recorded for equality/summary.
    leaf_size: usize,

    /// Minimum rows per parallel chunk.
    chunk_min: usize,

    /// Whether `neighbors` uses the parallel path.
    parallel: bool,

    /// Whether inputs were declared pre-scaled. Recorded only.
    scale: bool,

    /// Metric the reference index measures with.
    metric: DistanceMetric<T>,

    /// The radius-query collaborator.
    index: Arc<dyn SpatialIndex<T>>,

    /// Explicitly injected pool for parallel queries; when `None`, the
    /// process-scoped shared pool is used.
    pool: Option<Arc<WorkerPool>>,

    /// Fit lifecycle.
    state: Mutex<FitState<T>>,

    /// Signalled whenever the fit state leaves `Fitting`.
    fitted: Condvar,
}

impl<T: Float + Debug + Send + Sync + 'static> RadiusNeighbors<T> {
    /// Assemble a validated model. Crate-internal; the builder is the
    /// public entry point.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_config(
        data: Vec<T>,
        dimensions: usize,
        radius: T,
        leaf_size: usize,
        chunk_min: usize,
        parallel: bool,
        scale: bool,
        metric: DistanceMetric<T>,
        index: Arc<dyn SpatialIndex<T>>,
        pool: Option<Arc<WorkerPool>>,
    ) -> Self {
        let rows = data.len() / dimensions;
        let model = Self {
            data,
            rows,
            dimensions,
            radius,
            leaf_size,
            chunk_min,
            parallel,
            scale,
            metric,
            index,
            pool,
            state: Mutex::new(FitState::Unfitted),
            fitted: Condvar::new(),
        };
        log::info!("{}", model.summary());
        model
    }

    // ========================================================================
    // Fitting
    // ========================================================================

    /// Query the reference set against itself, remove self-matches, and
    /// publish the result with per-row statistics.
    ///
    /// Idempotent: the first caller computes; concurrent callers block
    /// until the computation publishes and then receive the same cached
    /// `Arc`. On failure the error is logged and propagated, no partial
    /// result is published, and the model returns to the unfitted state.
    pub fn fit(&self) -> Result<Arc<FittedRadius<T>>, RadiusError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            match &*state {
                FitState::Fitted(result) => return Ok(Arc::clone(result)),
                FitState::Fitting => {
                    state = self
                        .fitted
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                FitState::Unfitted => break,
            }
        }
        *state = FitState::Fitting;
        drop(state);

        let mut reset = FitReset {
            state: &self.state,
            fitted: &self.fitted,
            armed: true,
        };

        let started = Instant::now();
        let raw = self
            .index
            .query_radius(&self.data, self.radius, false)
            .map_err(|e| {
                log::error!(
                    "radius self-query failed during fit ({} rows, radius {:?}): {}",
                    self.rows,
                    self.radius,
                    e
                );
                e
            })?;
        log::info!(
            "queried index for radius neighbors in {:.3?}",
            started.elapsed()
        );

        let (neighborhood, summaries) = exclude_self(raw, started);
        let result = Arc::new(FittedRadius {
            neighborhood,
            summaries,
            elapsed: started.elapsed(),
        });

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = FitState::Fitted(Arc::clone(&result));
        reset.armed = false;
        self.fitted.notify_all();
        drop(state);

        log::info!("model fit completed in {:.3?}", result.elapsed);
        Ok(result)
    }

    /// Whether a fit has been published.
    pub fn is_fitted(&self) -> bool {
        matches!(
            &*self.state.lock().unwrap_or_else(PoisonError::into_inner),
            FitState::Fitted(_)
        )
    }

    /// The published fit result, if any. Never blocks on an in-flight fit.
    pub fn fitted(&self) -> Option<Arc<FittedRadius<T>>> {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            FitState::Fitted(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    // ========================================================================
    // Querying
    // ========================================================================

    /// Neighbors within the configured radius, using the configured
    /// parallelism.
    pub fn neighbors(&self, points: &[T]) -> Result<Neighborhood<T>, RadiusError> {
        self.neighbors_with(points, self.radius, self.parallel)
    }

    /// Neighbors within an explicit radius, using the configured
    /// parallelism.
    pub fn neighbors_within(&self, points: &[T], radius: T) -> Result<Neighborhood<T>, RadiusError> {
        self.neighbors_with(points, radius, self.parallel)
    }

    /// Neighbors with explicit radius and parallelism.
    ///
    /// Requires a completed fit. The result is raw: no self-exclusion is
    /// applied, and per-row entries are unsorted.
    pub fn neighbors_with(
        &self,
        points: &[T],
        radius: T,
        parallel: bool,
    ) -> Result<Neighborhood<T>, RadiusError> {
        if !self.is_fitted() {
            return Err(RadiusError::ModelNotFit);
        }
        Validator::validate_radius(radius)?;
        Validator::validate_query(points, self.dimensions)?;

        let serial_query =
            |chunk: &[T]| self.index.query_radius(chunk, radius, false);

        if parallel {
            // An explicitly injected pool wins; otherwise the process-scoped
            // shared pool is created lazily on first parallel query.
            match self.pool.clone().or_else(WorkerPool::shared) {
                Some(pool) => {
                    let dispatcher = ParallelDispatcher::new(pool, self.chunk_min);
                    match dispatcher.dispatch(points, self.dimensions, &serial_query) {
                        Ok(result) => return Ok(result),
                        Err(RadiusError::PoolSaturated { pending, capacity }) => {
                            log::warn!(
                                "parallel neighborhood search rejected ({}/{} in flight); \
                                 falling back to serial search",
                                pending,
                                capacity
                            );
                        }
                        Err(other) => return Err(other),
                    }
                }
                None => {
                    log::warn!(
                        "no worker pool available; falling back to serial search"
                    );
                }
            }
        }

        serial_query(points)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The configured query radius.
    pub fn radius(&self) -> T {
        self.radius
    }

    /// Number of reference rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Values per reference row.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Configuration snapshot for reporting.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            rows: self.rows,
            dimensions: self.dimensions,
            metric: self.metric.name(),
            radius: self.radius.to_f64().unwrap_or(f64::NAN),
            leaf_size: self.leaf_size,
            chunk_min: self.chunk_min,
            scale: self.scale,
            parallel: self.parallel,
        }
    }
}

/// Symmetric, exact model equality: radius, leaf size, chunk threshold,
/// dimensionality, and element-wise reference data.
impl<T: Float + 'static> PartialEq for RadiusNeighbors<T> {
    fn eq(&self, other: &Self) -> bool {
        self.radius == other.radius
            && self.leaf_size == other.leaf_size
            && self.chunk_min == other.chunk_min
            && self.dimensions == other.dimensions
            && self.data == other.data
    }
}

impl<T: Float + Debug + 'static> fmt::Debug for RadiusNeighbors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiusNeighbors")
            .field("rows", &self.rows)
            .field("dimensions", &self.dimensions)
            .field("radius", &self.radius)
            .field("leaf_size", &self.leaf_size)
            .field("chunk_min", &self.chunk_min)
            .field("parallel", &self.parallel)
            .field("scale", &self.scale)
            .field("metric", &self.metric)
            .field("fitted", &matches!(
                &*self.state.lock().unwrap_or_else(PoisonError::into_inner),
                FitState::Fitted(_)
            ))
            .finish()
    }
}
