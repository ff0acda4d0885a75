use super::unit_cube;
use decomp3d::driver::{CancellationToken, DriverOptions};
use decomp3d::engine::{
    ConvexHullRecord, DecompositionEngine, EngineParameters, EngineStatus, ExecutionMode,
    ParryEngine,
};
use decomp3d::math::Point;
use decomp3d::{DecompositionAdapter, DecompositionConfig, DecompositionError, InputMesh};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wraps an engine to count its releases.
struct TrackedEngine<E> {
    inner: E,
    releases: Arc<AtomicUsize>,
}

impl<E: DecompositionEngine> DecompositionEngine for TrackedEngine<E> {
    fn compute(&mut self, points: &[Point], triangles: &[[u32; 3]]) -> decomp3d::Result<()> {
        self.inner.compute(points, triangles)
    }

    fn poll(&mut self) -> EngineStatus {
        self.inner.poll()
    }

    fn hull_count(&self) -> usize {
        self.inner.hull_count()
    }

    fn hull(&self, i: usize) -> Option<&ConvexHullRecord> {
        self.inner.hull(i)
    }

    fn cancel(&mut self) {
        self.inner.cancel()
    }

    fn release(&mut self) {
        let _ = self.releases.fetch_add(1, Ordering::SeqCst);
        self.inner.release()
    }
}

/// Completes immediately with a fault.
struct FaultyEngine;

impl DecompositionEngine for FaultyEngine {
    fn compute(&mut self, _: &[Point], _: &[[u32; 3]]) -> decomp3d::Result<()> {
        Ok(())
    }

    fn poll(&mut self) -> EngineStatus {
        EngineStatus::Failed("voxelization failed".to_string())
    }

    fn hull_count(&self) -> usize {
        0
    }

    fn hull(&self, _: usize) -> Option<&ConvexHullRecord> {
        None
    }
}

/// Never completes.
struct StuckEngine;

impl DecompositionEngine for StuckEngine {
    fn compute(&mut self, _: &[Point], _: &[[u32; 3]]) -> decomp3d::Result<()> {
        Ok(())
    }

    fn poll(&mut self) -> EngineStatus {
        EngineStatus::Running
    }

    fn hull_count(&self) -> usize {
        0
    }

    fn hull(&self, _: usize) -> Option<&ConvexHullRecord> {
        None
    }
}

fn cube_mesh() -> InputMesh {
    let (points, faces) = unit_cube();
    InputMesh::from_strided_faces(&points, &faces).unwrap()
}

#[test]
fn outputs_outlive_the_released_engine() {
    let releases = Arc::new(AtomicUsize::new(0));
    let engine = TrackedEngine {
        inner: ParryEngine::new(EngineParameters::with_execution(ExecutionMode::Asynchronous)),
        releases: releases.clone(),
    };

    let adapter = DecompositionAdapter::default();
    let hulls = adapter.compute_with_engine(engine, &cube_mesh()).unwrap();
    assert_eq!(releases.load(Ordering::SeqCst), 1);

    // The hulls own their buffers: they are still complete once the engine is gone.
    let snapshot = hulls.clone();
    drop(adapter);
    assert_eq!(hulls.len(), 1);
    assert_eq!(hulls, snapshot);
    assert_eq!(hulls[0].num_vertices(), 8);
}

#[test]
fn failed_engine_is_released_and_reported() {
    let releases = Arc::new(AtomicUsize::new(0));
    let engine = TrackedEngine {
        inner: FaultyEngine,
        releases: releases.clone(),
    };

    let result = DecompositionAdapter::default().compute_with_engine(engine, &cube_mesh());
    assert_eq!(
        result,
        Err(DecompositionError::EngineFailure(
            "voxelization failed".to_string()
        ))
    );
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn stuck_engine_times_out_and_is_released() {
    let releases = Arc::new(AtomicUsize::new(0));
    let engine = TrackedEngine {
        inner: StuckEngine,
        releases: releases.clone(),
    };
    let adapter = DecompositionAdapter::new(DecompositionConfig {
        driver: DriverOptions {
            timeout: Some(Duration::from_millis(10)),
            ..DriverOptions::default()
        },
        ..DecompositionConfig::default()
    });

    assert_eq!(
        adapter.compute_with_engine(engine, &cube_mesh()),
        Err(DecompositionError::Timeout(Duration::from_millis(10)))
    );
    assert_eq!(releases.load(Ordering::SeqCst), 1);
}

#[test]
fn cancellation_from_another_thread_stops_the_wait() {
    let releases = Arc::new(AtomicUsize::new(0));
    let engine = TrackedEngine {
        inner: StuckEngine,
        releases: releases.clone(),
    };
    let adapter = DecompositionAdapter::default();
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            token.cancel();
        })
    };

    assert_eq!(
        adapter.compute_with_engine_cancellable(engine, &cube_mesh(), &token),
        Err(DecompositionError::Cancelled)
    );
    assert_eq!(releases.load(Ordering::SeqCst), 1);
    canceller.join().unwrap();
}

#[test]
fn cancelled_call_leaves_later_calls_unaffected() {
    let (points, faces) = unit_cube();
    let adapter = DecompositionAdapter::default();
    let shared = adapter.clone();

    let token = CancellationToken::new();
    token.cancel();
    assert_eq!(
        adapter.compute_decomposition_cancellable(&points, &faces, &token),
        Err(DecompositionError::Cancelled)
    );

    // Neither the adapter nor its clones remember the cancelled token.
    let hulls = adapter.compute_decomposition(&points, &faces).unwrap();
    assert_eq!(hulls.len(), 1);
    assert_eq!(shared.compute_decomposition(&points, &faces), Ok(hulls.clone()));
    assert_eq!(
        adapter.compute_decomposition_cancellable(&points, &faces, &CancellationToken::new()),
        Ok(hulls)
    );
}
