//! Neighborhood containers and the spatial index seam.
//!
//! ## Purpose
//!
//! This module defines the result container for batch radius queries
//! ([`Neighborhood`]), the trait through which the engine consumes a
//! spatial index ([`SpatialIndex`]), and the crate's reference index
//! implementation ([`LinearIndex`], an exhaustive scan).
//!
//! ## Design notes
//!
//! * **Index as collaborator**: The engine never sees index internals; it
//!   only calls `query_radius`. Alternative index structures plug in by
//!   implementing the trait.
//! * **Row pairing**: A neighborhood stores one index vector and one
//!   distance vector per queried row, positionally paired. Rows are never
//!   reordered; the dispatcher relies on `append` preserving row order
//!   when merging chunk results.
//! * **Inclusive boundary**: A reference point exactly on the radius is a
//!   neighbor (`d <= radius`).
//!
//! ## Invariants
//!
//! * Within a row, index and distance vectors have equal length.
//! * Row *i* of the output corresponds to query row *i* of the input.
//!
//! ## Non-goals
//!
//! * No tree-based or otherwise sublinear index structure is provided.
//! * No k-nearest-neighbor queries.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::math::distance::DistanceMetric;
use crate::primitives::errors::RadiusError;

// ============================================================================
// Neighborhood Structure
// ============================================================================

/// Result container for a batch radius query.
///
/// Row *i* holds the reference-set indices within the query radius of input
/// row *i*, with their distances. Within a row, entries are positionally
/// paired and need not be sorted by distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighborhood<T> {
    /// Per-row neighbor indices into the reference set.
    pub indices: Vec<Vec<usize>>,
    /// Per-row distances, paired with `indices`.
    pub distances: Vec<Vec<T>>,
}

impl<T: Float> Neighborhood<T> {
    /// Create a new empty neighborhood.
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
            distances: Vec::new(),
        }
    }

    /// Pre-allocate for `rows` query rows.
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            indices: Vec::with_capacity(rows),
            distances: Vec::with_capacity(rows),
        }
    }

    /// Assemble a neighborhood from parallel row vectors.
    pub fn from_parts(indices: Vec<Vec<usize>>, distances: Vec<Vec<T>>) -> Self {
        debug_assert_eq!(indices.len(), distances.len());
        debug_assert!(indices
            .iter()
            .zip(distances.iter())
            .all(|(i, d)| i.len() == d.len()));
        Self { indices, distances }
    }

    /// Append one row of paired indices and distances.
    pub fn push_row(&mut self, indices: Vec<usize>, distances: Vec<T>) {
        debug_assert_eq!(indices.len(), distances.len());
        self.indices.push(indices);
        self.distances.push(distances);
    }

    /// Borrow row `i` as paired slices.
    pub fn row(&self, i: usize) -> (&[usize], &[T]) {
        (&self.indices[i], &self.distances[i])
    }

    /// Concatenate `other`'s rows after this neighborhood's rows.
    ///
    /// Chunk merging depends on this being a plain ordered concatenation.
    pub fn append(&mut self, mut other: Self) {
        self.indices.append(&mut other.indices);
        self.distances.append(&mut other.distances);
    }

    /// Number of query rows represented.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no rows are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<T: Float> Default for Neighborhood<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Spatial Index Seam
// ============================================================================

/// Radius-query primitive over an index built from the reference dataset.
///
/// Implementations answer, for each flattened query row, all reference-set
/// indices within `radius`, with their distances. The engine treats the
/// index as an opaque collaborator; its structure and pruning strategy are
/// its own business.
pub trait SpatialIndex<T: Float>: Send + Sync + Debug {
    /// Query all reference points within `radius` of each input row.
    ///
    /// `points` is flattened row-major with this index's dimensionality.
    /// When `sorted` is true, each row's entries are ordered by ascending
    /// distance; the engine itself always queries unsorted, since summary
    /// statistics do not require order.
    fn query_radius(
        &self,
        points: &[T],
        radius: T,
        sorted: bool,
    ) -> Result<Neighborhood<T>, RadiusError>;

    /// Number of reference rows indexed.
    fn rows(&self) -> usize;

    /// Dimensionality of the indexed points.
    fn dimensions(&self) -> usize;
}

// ============================================================================
// Linear Index Implementation
// ============================================================================

/// Exhaustive-scan reference index.
///
/// Compares every query row against every reference row with the
/// configured metric. O(n·q) per batch, no build cost beyond copying the
/// data, exact by construction.
#[derive(Debug, Clone)]
pub struct LinearIndex<T> {
    /// Flattened reference data, row-major.
    data: Vec<T>,
    /// Number of reference rows.
    rows: usize,
    /// Values per row.
    dimensions: usize,
    /// Metric used for every comparison.
    metric: DistanceMetric<T>,
}

impl<T: Float + Debug + Send + Sync> LinearIndex<T> {
    /// Build a linear index over flattened row-major reference data.
    ///
    /// The caller guarantees `data.len()` is a multiple of `dimensions`;
    /// the model builder validates this before construction.
    pub fn new(data: Vec<T>, dimensions: usize, metric: DistanceMetric<T>) -> Self {
        debug_assert!(dimensions > 0);
        debug_assert_eq!(data.len() % dimensions, 0);
        let rows = data.len() / dimensions;
        Self {
            data,
            rows,
            dimensions,
            metric,
        }
    }

    /// Scan one query point, collecting (index, distance) pairs within radius.
    fn scan_row(&self, query: &[T], radius: T, sorted: bool) -> (Vec<usize>, Vec<T>) {
        let d = self.dimensions;
        let mut hits: Vec<(usize, T)> = Vec::new();

        for r in 0..self.rows {
            let reference = &self.data[r * d..(r + 1) * d];
            let dist = self.metric.eval(query, reference);
            if dist <= radius {
                hits.push((r, dist));
            }
        }

        if sorted {
            hits.sort_unstable_by(|a, b| {
                a.1.partial_cmp(&b.1).unwrap_or(core::cmp::Ordering::Equal)
            });
        }

        hits.into_iter().unzip()
    }
}

impl<T: Float + Debug + Send + Sync> SpatialIndex<T> for LinearIndex<T> {
    fn query_radius(
        &self,
        points: &[T],
        radius: T,
        sorted: bool,
    ) -> Result<Neighborhood<T>, RadiusError> {
        let d = self.dimensions;
        let q_rows = points.len() / d;

        let mut out = Neighborhood::new();
        out.indices
            .try_reserve(q_rows)
            .map_err(|e| RadiusError::OutOfMemory(format!("result rows: {}", e)))?;
        out.distances
            .try_reserve(q_rows)
            .map_err(|e| RadiusError::OutOfMemory(format!("result rows: {}", e)))?;

        for q in 0..q_rows {
            let query = &points[q * d..(q + 1) * d];
            let (idx, dist) = self.scan_row(query, radius, sorted);
            out.push_row(idx, dist);
        }

        Ok(out)
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
