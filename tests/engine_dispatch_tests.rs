#![cfg(feature = "dev")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use radius_rs::internals::engine::dispatch::ParallelDispatcher;
use radius_rs::prelude::*;

fn reference_index(n: usize) -> LinearIndex<f64> {
    let data: Vec<f64> = (0..n).map(|i| i as f64).collect();
    LinearIndex::new(data, 1, Euclidean)
}

#[test]
fn test_dispatch_matches_serial_for_any_chunk_min() {
    let index = reference_index(64);
    let queries: Vec<f64> = (0..40).map(|i| (i as f64) * 1.7).collect();
    let radius = 2.5;

    let query = |chunk: &[f64]| index.query_radius(chunk, radius, false);
    let serial = query(&queries).unwrap();

    let pool = Arc::new(WorkerPool::new(4, 8).unwrap());
    for chunk_min in [1, 2, 3, 7, 40, 1000] {
        let dispatcher = ParallelDispatcher::new(Arc::clone(&pool), chunk_min);
        let parallel = dispatcher.dispatch(&queries, 1, &query).unwrap();
        assert_eq!(parallel, serial, "chunk_min={}", chunk_min);
    }
}

#[test]
fn test_dispatch_matches_serial_multidimensional() {
    // 2-D grid reference set
    let data: Vec<f64> = (0..10)
        .flat_map(|i| (0..10).map(move |j| [i as f64, j as f64]))
        .flatten()
        .collect();
    let index = LinearIndex::new(data, 2, Euclidean);

    let queries: Vec<f64> = (0..15).flat_map(|i| [i as f64 * 0.6, 3.3]).collect();
    let query = |chunk: &[f64]| index.query_radius(chunk, 1.2, false);
    let serial = query(&queries).unwrap();

    let pool = Arc::new(WorkerPool::new(2, 8).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 2);
    let parallel = dispatcher.dispatch(&queries, 2, &query).unwrap();

    assert_eq!(parallel, serial);
}

#[test]
fn test_dispatch_row_order_is_input_order() {
    let index = reference_index(32);
    let queries: Vec<f64> = (0..32).map(|i| i as f64).collect();

    let pool = Arc::new(WorkerPool::new(4, 8).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 1);
    let result = dispatcher
        .dispatch(&queries, 1, &|chunk| index.query_radius(chunk, 0.1, false))
        .unwrap();

    assert_eq!(result.len(), 32);
    for (row, idx) in result.indices.iter().enumerate() {
        // Radius 0.1 around integer i matches exactly reference point i.
        assert_eq!(idx, &vec![row]);
    }
}

#[test]
fn test_dispatch_saturated_pool_rejects_before_any_work() {
    let index = reference_index(8);
    let queries = [0.0, 1.0, 2.0];
    let calls = AtomicUsize::new(0);

    let pool = Arc::new(WorkerPool::new(1, 0).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 1);
    let result = dispatcher.dispatch(&queries, 1, &|chunk| {
        calls.fetch_add(1, Ordering::SeqCst);
        index.query_radius(chunk, 1.0, false)
    });

    assert!(matches!(result, Err(RadiusError::PoolSaturated { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dispatch_leaf_error_propagates() {
    let queries = [0.0, 1.0, 2.0, 3.0];
    let pool = Arc::new(WorkerPool::new(2, 8).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 1);

    let result = dispatcher.dispatch(&queries, 1, &|_chunk: &[f64]| {
        Err(RadiusError::Index("node fault".to_string()))
    });

    assert_eq!(result, Err(RadiusError::Index("node fault".to_string())));
}

#[test]
fn test_dispatch_empty_batch() {
    let index = reference_index(4);
    let pool = Arc::new(WorkerPool::new(1, 4).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 8);

    let result = dispatcher
        .dispatch(&[], 1, &|chunk| index.query_radius(chunk, 1.0, false))
        .unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_dispatch_exposes_chunk_min() {
    let pool = Arc::new(WorkerPool::new(1, 4).unwrap());
    let dispatcher = ParallelDispatcher::new(pool, 123);
    assert_eq!(dispatcher.chunk_min(), 123);
}
