//! Bounded worker pool for parallel query dispatch.
//!
//! ## Purpose
//!
//! This module provides `WorkerPool`, a thin admission layer over a
//! dedicated rayon `ThreadPool`. All parallel neighborhood searches in the
//! crate run on such a pool; every other operation stays on the caller's
//! thread.
//!
//! ## Design notes
//!
//! * **Explicit object**: The pool is an owned value passed into models as
//!   a dependency, not ambient global state. A process-scoped default is
//!   available via [`WorkerPool::shared`] for callers that do not care.
//! * **Bounded admission**: rayon accepts work unconditionally, so
//!   saturation is enforced here with an atomic in-flight counter. A full
//!   pool rejects the submission *before* any work starts, which is what
//!   lets the dispatcher fall back to a serial search cleanly.
//! * **Synchronous**: `submit` runs the job to completion on the pool and
//!   returns its value; there is no fire-and-forget path.
//!
//! ## Invariants
//!
//! * The in-flight count never exceeds `capacity`.
//! * A rejected submission performs no work and leaves no state behind.
//!
//! ## Non-goals
//!
//! * This module does not split work into chunks (handled by
//!   `engine::dispatch`).
//! * This module does not implement cancellation.

use core::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::primitives::errors::RadiusError;

/// Default number of concurrent top-level submissions admitted before the
/// pool starts rejecting.
pub const DEF_POOL_CAPACITY: usize = 32;

/// A dedicated, bounded worker pool shared by any number of models.
pub struct WorkerPool {
    /// Dedicated rayon thread pool; never the global one.
    pool: ThreadPool,

    /// Maximum number of concurrently admitted submissions.
    capacity: usize,

    /// Submissions currently in flight.
    pending: AtomicUsize,
}

/// Decrements the in-flight counter when a submission finishes, including
/// on panic unwind out of the job.
struct Permit<'a>(&'a AtomicUsize);

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl WorkerPool {
    /// Create a pool with the given thread count and admission capacity.
    ///
    /// `threads == 0` selects rayon's default (one per logical core).
    pub fn new(threads: usize, capacity: usize) -> Result<Self, RadiusError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("radius-worker-{}", i))
            .build()
            .map_err(|e| RadiusError::PoolUnavailable(e.to_string()))?;

        Ok(Self {
            pool,
            capacity,
            pending: AtomicUsize::new(0),
        })
    }

    /// The process-scoped default pool, built lazily on first use.
    ///
    /// Returns `None` if the pool could not be constructed; that outcome is
    /// permanent for the process, and callers treat it as a standing
    /// dispatch rejection (serial fallback).
    pub fn shared() -> Option<Arc<WorkerPool>> {
        static SHARED: OnceLock<Option<Arc<WorkerPool>>> = OnceLock::new();
        SHARED
            .get_or_init(|| match WorkerPool::new(0, DEF_POOL_CAPACITY) {
                Ok(pool) => Some(Arc::new(pool)),
                Err(e) => {
                    log::warn!("shared worker pool could not be built: {}", e);
                    None
                }
            })
            .clone()
    }

    /// Run `job` on the pool, blocking until it completes.
    ///
    /// Returns `Err(PoolSaturated)` without running anything when the
    /// admission capacity is exhausted.
    pub fn submit<R, F>(&self, job: F) -> Result<R, RadiusError>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        let mut current = self.pending.load(Ordering::Acquire);
        loop {
            if current >= self.capacity {
                return Err(RadiusError::PoolSaturated {
                    pending: current,
                    capacity: self.capacity,
                });
            }
            match self.pending.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }

        let _permit = Permit(&self.pending);
        Ok(self.pool.install(job))
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Admission capacity of the pool.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Submissions currently in flight.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads())
            .field("capacity", &self.capacity)
            .field("pending", &self.pending())
            .finish()
    }
}
