//! Layer 3: Evaluation
//!
//! # Purpose
//!
//! This layer post-processes fit results and packages read-only summaries:
//! - Self-exclusion and per-row distance statistics
//! - Model and fit-report formatting
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Evaluation ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Self-exclusion filtering and per-row fit statistics.
pub mod postfit;

/// Model summary and fit-report formatting.
pub mod report;
