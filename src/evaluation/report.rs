//! Model and fit summaries for reporting.
//!
//! ## Purpose
//!
//! This module carries the read-only summary types handed to reporting:
//! the model configuration summary printed at construction, and the
//! formatting of per-row fit statistics.
//!
//! ## Design notes
//!
//! * **One-way**: Summaries are produced for display and logging; nothing
//!   feeds back into the engine.
//! * **Plain text**: Fixed-width columns in the style of the fitted-row
//!   table, no formatting dependencies.

// External dependencies
use core::fmt;

// Internal dependencies
use crate::evaluation::postfit::RowSummary;

// ============================================================================
// Model Summary
// ============================================================================

/// Configuration snapshot of a constructed model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    /// Reference rows.
    pub rows: usize,
    /// Values per row.
    pub dimensions: usize,
    /// Distance metric name.
    pub metric: &'static str,
    /// Configured query radius.
    pub radius: f64,
    /// Leaf size handed to index builders.
    pub leaf_size: usize,
    /// Minimum chunk size for parallel dispatch.
    pub chunk_min: usize,
    /// Whether inputs were declared pre-scaled.
    pub scale: bool,
    /// Whether queries may use the worker pool.
    pub parallel: bool,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model:")?;
        writeln!(f, "  Num Rows:   {}", self.rows)?;
        writeln!(f, "  Num Cols:   {}", self.dimensions)?;
        writeln!(f, "  Metric:     {}", self.metric)?;
        writeln!(f, "  Radius:     {}", self.radius)?;
        writeln!(f, "  Leaf Size:  {}", self.leaf_size)?;
        writeln!(f, "  Chunk Min:  {}", self.chunk_min)?;
        writeln!(f, "  Scale:      {}", self.scale)?;
        write!(f, "  Allow Par.: {}", self.parallel)
    }
}

// ============================================================================
// Fit Report
// ============================================================================

/// Write the fitted-row statistics table.
///
/// Columns: instance, neighbor count, nearest, mean, and farthest distance,
/// and cumulative wall time at summarization. Empty rows print `-` for the
/// undefined statistics.
pub fn write_fit_rows<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    summaries: &[RowSummary<T>],
) -> fmt::Result {
    writeln!(
        f,
        "  {:>8} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Instance", "Neighbors", "Nearest", "Mean Dist", "Farthest", "Wall"
    )?;
    writeln!(f, "  {}", "-".repeat(72))?;

    for s in summaries {
        writeln!(
            f,
            "  {:>8} {:>10} {:>12} {:>12} {:>12} {:>10.3?}",
            s.row,
            s.count,
            display_opt(&s.nearest),
            display_opt(&s.mean),
            display_opt(&s.farthest),
            s.wall,
        )?;
    }
    Ok(())
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => format!("{:.5}", v),
        None => "-".to_string(),
    }
}
