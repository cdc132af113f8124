//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides the measurement and containment building blocks for
//! radius queries:
//! - Distance metrics
//! - The neighborhood result container and the spatial index seam
//!
//! These are reusable pieces with no orchestration logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Evaluation
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Distance metrics for radius-neighborhood computation.
pub mod distance;

/// Neighborhood container, spatial index trait, and the linear reference index.
pub mod neighborhood;
