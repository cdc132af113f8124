//! Fit-time post-processing: self-exclusion and per-row statistics.
//!
//! ## Purpose
//!
//! This module turns the raw result of querying the reference set against
//! itself into the published fitted neighborhood. Because row *i* of that
//! query is point *i* itself, every row contains a trivial self-match at
//! distance zero; this pass removes it and summarizes what remains.
//!
//! ## Design notes
//!
//! * **Stable filter**: Surviving entries keep their relative order; the
//!   pass never sorts.
//! * **Single sweep**: Statistics are accumulated in the same loop that
//!   filters, so each row is touched once.
//! * **Explicit undefined**: An empty row has no nearest, mean, or
//!   farthest distance; those fields are `None`, never NaN and never an
//!   error.
//!
//! ## Invariants
//!
//! * Output row *i* never contains index *i*.
//! * A row's filtered count equals its raw count minus the number of
//!   self-matches it contained.
//! * One `RowSummary` per row, in row order.
//!
//! ## Non-goals
//!
//! * This module does not apply to ad hoc queries; self-exclusion is a
//!   fit-time-only normalization.

// External dependencies
use core::time::Duration;
use num_traits::Float;
use std::time::Instant;

// Internal dependencies
use crate::math::neighborhood::Neighborhood;

// ============================================================================
// Row Summary
// ============================================================================

/// Per-row fit statistics, recorded after self-exclusion.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSummary<T> {
    /// Row index in the reference set.
    pub row: usize,

    /// Number of neighbors after self-exclusion.
    pub count: usize,

    /// Smallest retained distance; `None` when the row is empty.
    pub nearest: Option<T>,

    /// Arithmetic mean of retained distances; `None` when the row is empty.
    pub mean: Option<T>,

    /// Largest retained distance; `None` when the row is empty.
    pub farthest: Option<T>,

    /// Elapsed wall time since fit start when this row was summarized.
    pub wall: Duration,
}

// ============================================================================
// Post-Fit Pass
// ============================================================================

/// Remove self-matches from a reference self-query and summarize each row.
///
/// `raw` must come from querying the reference set against itself, so that
/// row *i*'s own position in the reference set is *i*. `started` is the
/// fit start time; each summary records the cumulative elapsed time at the
/// moment its row was processed.
pub fn exclude_self<T: Float>(
    raw: Neighborhood<T>,
    started: Instant,
) -> (Neighborhood<T>, Vec<RowSummary<T>>) {
    let n = raw.len();
    let mut filtered = Neighborhood::with_capacity(n);
    let mut summaries = Vec::with_capacity(n);

    for (row, (indices, distances)) in raw
        .indices
        .into_iter()
        .zip(raw.distances.into_iter())
        .enumerate()
    {
        let mut kept_idx = Vec::with_capacity(indices.len());
        let mut kept_dist = Vec::with_capacity(distances.len());

        let mut sum = T::zero();
        let mut nearest: Option<T> = None;
        let mut farthest: Option<T> = None;

        for (&neighbor, &dist) in indices.iter().zip(distances.iter()) {
            if neighbor == row {
                continue;
            }
            sum = sum + dist;
            nearest = Some(nearest.map_or(dist, |m| m.min(dist)));
            farthest = Some(farthest.map_or(dist, |m| m.max(dist)));
            kept_idx.push(neighbor);
            kept_dist.push(dist);
        }

        let count = kept_idx.len();
        let mean = if count == 0 {
            None
        } else {
            T::from(count).map(|c| sum / c)
        };

        summaries.push(RowSummary {
            row,
            count,
            nearest,
            mean,
            farthest,
            wall: started.elapsed(),
        });
        filtered.push_row(kept_idx, kept_dist);
    }

    (filtered, summaries)
}
