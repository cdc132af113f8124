use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use radius_rs::prelude::*;

/// Wraps the linear index and counts radius queries.
#[derive(Debug)]
struct CountingIndex {
    inner: LinearIndex<f64>,
    calls: AtomicUsize,
}

impl CountingIndex {
    fn new(data: Vec<f64>, dimensions: usize) -> Self {
        Self {
            inner: LinearIndex::new(data, dimensions, Euclidean),
            calls: AtomicUsize::new(0),
        }
    }
}

impl SpatialIndex<f64> for CountingIndex {
    fn query_radius(
        &self,
        points: &[f64],
        radius: f64,
        sorted: bool,
    ) -> Result<Neighborhood<f64>, RadiusError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.query_radius(points, radius, sorted)
    }

    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

/// Fails every query until `healed` is set.
#[derive(Debug)]
struct FlakyIndex {
    inner: LinearIndex<f64>,
    healed: AtomicBool,
}

impl SpatialIndex<f64> for FlakyIndex {
    fn query_radius(
        &self,
        points: &[f64],
        radius: f64,
        sorted: bool,
    ) -> Result<Neighborhood<f64>, RadiusError> {
        if !self.healed.load(Ordering::SeqCst) {
            return Err(RadiusError::OutOfMemory(
                "simulated exhaustion during query".to_string(),
            ));
        }
        self.inner.query_radius(points, radius, sorted)
    }

    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

fn data() -> Vec<f64> {
    vec![0.0, 1.0, 2.0, 10.0]
}

#[test]
fn test_query_before_fit_fails_with_not_fit() {
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&data(), 1)
        .unwrap();

    assert!(!model.is_fitted());
    assert!(model.fitted().is_none());
    assert!(matches!(
        model.neighbors(&[1.0]),
        Err(RadiusError::ModelNotFit)
    ));
}

#[test]
fn test_fit_is_idempotent_and_caches() {
    let index = Arc::new(CountingIndex::new(data(), 1));
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .custom_index(index.clone())
        .build(&data(), 1)
        .unwrap();

    let first = model.fit().unwrap();
    let second = model.fit().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    assert!(model.is_fitted());
}

#[test]
fn test_concurrent_fits_compute_exactly_once() {
    let index = Arc::new(CountingIndex::new(data(), 1));
    let model = Arc::new(
        RadiusNeighborsBuilder::new()
            .radius(1.5)
            .custom_index(index.clone())
            .build(&data(), 1)
            .unwrap(),
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let model = Arc::clone(&model);
        handles.push(thread::spawn(move || model.fit().unwrap()));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Exactly one computation; every caller got the same published Arc.
    assert_eq!(index.calls.load(Ordering::SeqCst), 1);
    for result in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], result));
    }

    // No row duplicated or corrupted in the shared result.
    let fitted = &results[0];
    assert_eq!(fitted.neighborhood.len(), 4);
    assert_eq!(fitted.summaries.len(), 4);
}

#[test]
fn test_failed_fit_leaves_model_unfitted_and_retries_clean() {
    let index = Arc::new(FlakyIndex {
        inner: LinearIndex::new(data(), 1, Euclidean),
        healed: AtomicBool::new(false),
    });
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .custom_index(index.clone())
        .build(&data(), 1)
        .unwrap();

    // Fatal failure propagates; nothing is published.
    assert!(matches!(model.fit(), Err(RadiusError::OutOfMemory(_))));
    assert!(!model.is_fitted());
    assert!(model.fitted().is_none());
    assert!(matches!(
        model.neighbors(&[1.0]),
        Err(RadiusError::ModelNotFit)
    ));

    // A later fit starts from scratch and succeeds.
    index.healed.store(true, Ordering::SeqCst);
    let fitted = model.fit().unwrap();
    assert!(model.is_fitted());
    assert_eq!(fitted.neighborhood.len(), 4);
}

#[test]
fn test_query_invalid_radius_rejected_after_fit() {
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&data(), 1)
        .unwrap();
    model.fit().unwrap();

    assert!(matches!(
        model.neighbors_within(&[1.0], 0.0),
        Err(RadiusError::InvalidRadius(_))
    ));
    assert!(matches!(
        model.neighbors_within(&[1.0], -2.0),
        Err(RadiusError::InvalidRadius(_))
    ));
    assert!(matches!(
        model.neighbors_within(&[1.0], f64::NAN),
        Err(RadiusError::InvalidRadius(_))
    ));
}

#[test]
fn test_query_shape_mismatch_rejected() {
    let data: Vec<f64> = vec![0.0, 0.0, 1.0, 1.0];
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&data, 2)
        .unwrap();
    model.fit().unwrap();

    assert!(matches!(
        model.neighbors(&[0.5, 0.5, 0.5]),
        Err(RadiusError::MismatchedShape { len: 3, dimensions: 2 })
    ));
}

#[test]
fn test_parallel_query_matches_serial() {
    let reference: Vec<f64> = (0..128).map(|i| i as f64).collect();
    let queries: Vec<f64> = (0..97).map(|i| (i as f64) * 1.3).collect();

    let model = RadiusNeighborsBuilder::new()
        .radius(2.0)
        .chunk_min(4)
        .build(&reference, 1)
        .unwrap();
    model.fit().unwrap();

    let serial = model.neighbors_with(&queries, 2.0, false).unwrap();
    let parallel = model.neighbors_with(&queries, 2.0, true).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn test_saturated_pool_falls_back_to_serial_silently() {
    let reference: Vec<f64> = (0..64).map(|i| i as f64).collect();
    let queries: Vec<f64> = (0..33).map(|i| (i as f64) * 1.9).collect();

    // Capacity 0: every dispatch is rejected up front.
    let rejecting_pool = Arc::new(WorkerPool::new(1, 0).unwrap());
    let model = RadiusNeighborsBuilder::new()
        .radius(2.0)
        .parallel(true)
        .chunk_min(2)
        .worker_pool(rejecting_pool)
        .build(&reference, 1)
        .unwrap();
    model.fit().unwrap();

    let fallback = model.neighbors(&queries).unwrap();

    let serial_model = RadiusNeighborsBuilder::new()
        .radius(2.0)
        .build(&reference, 1)
        .unwrap();
    serial_model.fit().unwrap();
    let serial = serial_model.neighbors(&queries).unwrap();

    assert_eq!(fallback, serial);
}

#[test]
fn test_concurrent_queries_share_fitted_model() {
    let reference: Vec<f64> = (0..32).map(|i| i as f64).collect();
    let model = Arc::new(
        RadiusNeighborsBuilder::new()
            .radius(1.0)
            .build(&reference, 1)
            .unwrap(),
    );
    model.fit().unwrap();

    let mut handles = Vec::new();
    for t in 0..4 {
        let model = Arc::clone(&model);
        handles.push(thread::spawn(move || {
            let q = [t as f64 + 0.25];
            model.neighbors(&q).unwrap()
        }));
    }
    for (t, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        // t + 0.25 is within 1.0 of reference points t and t + 1.
        assert_eq!(result.indices[0], vec![t, t + 1]);
    }
}

#[test]
fn test_model_equality_is_symmetric_and_exact() {
    let a = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&data(), 1)
        .unwrap();
    let b = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&data(), 1)
        .unwrap();
    let c = RadiusNeighborsBuilder::new()
        .radius(2.5)
        .build(&data(), 1)
        .unwrap();
    let d = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .leaf_size(7)
        .build(&data(), 1)
        .unwrap();
    let e = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .build(&[0.0, 1.0, 2.0, 10.5], 1)
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, c);
    assert_ne!(a, d);
    assert_ne!(a, e);

    // Fitting does not change identity.
    a.fit().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_model_summary_reflects_configuration() {
    let model = RadiusNeighborsBuilder::new()
        .radius(1.5)
        .metric(Manhattan)
        .leaf_size(16)
        .chunk_min(64)
        .parallel(true)
        .scale(true)
        .build(&data(), 1)
        .unwrap();

    let summary = model.summary();
    assert_eq!(summary.rows, 4);
    assert_eq!(summary.dimensions, 1);
    assert_eq!(summary.metric, "Manhattan");
    assert_eq!(summary.radius, 1.5);
    assert_eq!(summary.leaf_size, 16);
    assert_eq!(summary.chunk_min, 64);
    assert!(summary.scale);
    assert!(summary.parallel);

    let text = format!("{}", summary);
    assert!(text.contains("Num Rows:   4"));
    assert!(text.contains("Metric:     Manhattan"));
    assert!(text.contains("Allow Par.: true"));
}
