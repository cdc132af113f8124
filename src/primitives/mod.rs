//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the foundational building blocks used throughout
//! the crate:
//! - The crate-wide error type
//! - The bounded worker pool backing parallel dispatch
//!
//! These carry no query semantics of their own.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Crate-wide error type.
pub mod errors;

/// Bounded worker pool for parallel dispatch.
pub mod pool;
