//! Parallel dispatch of batch radius queries.
//!
//! ## Purpose
//!
//! This module splits an N-row query batch into contiguous row chunks,
//! runs the chunks on a bounded worker pool, and merges the results back
//! in input order. It is the only place in the crate that fans work out to
//! other threads.
//!
//! ## Design notes
//!
//! * **Plain recursion, no task classes**: The batch is halved recursively
//!   down to `chunk_min` rows; halves run through `rayon::join`. The leaf
//!   computation is a caller-supplied closure, so the same dispatcher can
//!   serve any query kind.
//! * **Single admission**: The whole batch is admitted to the pool as one
//!   submission. Saturation therefore rejects *before* any chunk runs —
//!   the dispatcher never returns partially merged work.
//! * **Deterministic merge**: Chunks are contiguous, never overlapping,
//!   and concatenated left-to-right, so output row *i* always corresponds
//!   to input row *i* regardless of thread scheduling.
//!
//! ## Invariants
//!
//! * Chunk row ranges partition `[0, rows)` and never overlap.
//! * The merged result is bit-identical to a serial evaluation of the same
//!   leaf closure over the whole batch.
//!
//! ## Non-goals
//!
//! * This module does not decide *whether* to parallelize, nor does it
//!   fall back to serial execution (the engine does, on rejection).
//! * No mid-flight cancellation.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::math::neighborhood::Neighborhood;
use crate::primitives::errors::RadiusError;
use crate::primitives::pool::WorkerPool;

/// Default minimum number of rows per parallel chunk.
pub const DEF_CHUNK_MIN: usize = 500;

// ============================================================================
// Parallel Dispatcher
// ============================================================================

/// Splits query batches across a shared worker pool and merges results in
/// input order.
#[derive(Debug, Clone)]
pub struct ParallelDispatcher {
    /// Pool the chunk computations run on.
    pool: Arc<WorkerPool>,

    /// Stop splitting once a chunk has at most this many rows.
    chunk_min: usize,
}

impl ParallelDispatcher {
    /// Create a dispatcher over the given pool and chunk threshold.
    pub fn new(pool: Arc<WorkerPool>, chunk_min: usize) -> Self {
        debug_assert!(chunk_min > 0);
        Self { pool, chunk_min }
    }

    /// Run `query` over `points` in row chunks, merging in input order.
    ///
    /// Returns `Err(PoolSaturated)` untouched if the pool refuses the
    /// batch; any error from a leaf propagates unchanged. `points` must be
    /// flattened row-major with the given dimensionality.
    pub fn dispatch<T, Q>(
        &self,
        points: &[T],
        dimensions: usize,
        query: &Q,
    ) -> Result<Neighborhood<T>, RadiusError>
    where
        T: Float + Debug + Send + Sync,
        Q: Fn(&[T]) -> Result<Neighborhood<T>, RadiusError> + Send + Sync,
    {
        debug_assert!(dimensions > 0);
        let chunk_min = self.chunk_min;
        self.pool
            .submit(|| split_query(points, dimensions, chunk_min, query))?
    }

    /// The dispatcher's chunk threshold.
    pub fn chunk_min(&self) -> usize {
        self.chunk_min
    }
}

/// Recursively halve the batch down to `chunk_min` rows and join results.
fn split_query<T, Q>(
    points: &[T],
    dimensions: usize,
    chunk_min: usize,
    query: &Q,
) -> Result<Neighborhood<T>, RadiusError>
where
    T: Float + Debug + Send + Sync,
    Q: Fn(&[T]) -> Result<Neighborhood<T>, RadiusError> + Send + Sync,
{
    let rows = points.len() / dimensions;
    if rows <= chunk_min {
        return query(points);
    }

    let mid = rows / 2;
    let (lo, hi) = points.split_at(mid * dimensions);

    let (left, right) = rayon::join(
        || split_query(lo, dimensions, chunk_min, query),
        || split_query(hi, dimensions, chunk_min, query),
    );

    let mut merged = left?;
    merged.append(right?);
    Ok(merged)
}
