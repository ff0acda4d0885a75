//! The convex decomposition engines and their lifecycle.
//!
//! An engine goes through a create, compute, poll, retrieve and release lifecycle:
//!
//! 1. it is created with its parameters (see [`ParryEngine::new`]);
//! 2. [`DecompositionEngine::compute`] submits one job;
//! 3. [`DecompositionEngine::poll`] is called until it no longer reports [`EngineStatus::Running`];
//! 4. hull records are borrowed through [`DecompositionEngine::hull`];
//! 5. [`DecompositionEngine::release`] frees the engine's resources.
//!
//! Steps 3 to 5 are handled by the [`driver`](crate::driver).

pub use self::parameters::{EngineParameters, ExecutionMode, HullSource, DEFAULT_CONCAVITY};
pub use self::parry_engine::ParryEngine;

use crate::error::Result;
use crate::math::{Point, Real};

mod parameters;
mod parry_engine;

/// The completion state of an engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineStatus {
    /// The decomposition has not completed yet.
    Running,
    /// The decomposition completed and its hull records can be retrieved.
    ///
    /// Note that a completed decomposition may have produced zero hulls.
    Ready,
    /// The engine reported an internal fault.
    Failed(String),
}

/// One convex piece produced by an engine.
///
/// Triangle indices are zero-based and local to the hull's own `points`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHullRecord {
    /// The vertices of the hull.
    pub points: Vec<Point>,
    /// The triangles of the hull.
    pub triangles: Vec<[u32; 3]>,
}

impl ConvexHullRecord {
    /// Creates a hull record from its vertices and triangles.
    pub fn new(points: Vec<Point>, triangles: Vec<[u32; 3]>) -> Self {
        Self { points, triangles }
    }

    /// The signed volume enclosed by this hull.
    ///
    /// Positive if the triangles are oriented counter-clockwise when seen from outside.
    pub fn signed_volume(&self) -> Real {
        signed_volume(&self.points, &self.triangles)
    }
}

/// The volume enclosed by a closed triangle mesh, summed over the tetrahedra formed by its
/// triangles and its geometric center.
pub(crate) fn signed_volume(points: &[Point], triangles: &[[u32; 3]]) -> Real {
    if points.is_empty() {
        return 0.0;
    }

    let center = Point::from(
        points.iter().map(|pt| pt.coords).sum::<na::Vector3<Real>>() / points.len() as Real,
    );

    triangles
        .iter()
        .map(|t| {
            parry::shape::Tetrahedron::new(
                center,
                points[t[0] as usize],
                points[t[1] as usize],
                points[t[2] as usize],
            )
            .signed_volume()
        })
        .sum()
}

/// An approximate convex decomposition engine.
///
/// Hull records are borrowed from the engine: they cannot outlive it, and must be
/// copied out before the engine is released.
pub trait DecompositionEngine {
    /// Submits a decomposition job for the given triangle mesh.
    ///
    /// Every index of `triangles` is guaranteed to be smaller than `points.len()`.
    /// A synchronous engine may run the whole decomposition within this call.
    fn compute(&mut self, points: &[Point], triangles: &[[u32; 3]]) -> Result<()>;

    /// Reports the completion state of the submitted job, without blocking.
    fn poll(&mut self) -> EngineStatus;

    /// The number of hulls produced by a completed job.
    fn hull_count(&self) -> usize;

    /// The `i`-th hull produced by a completed job, if `i < self.hull_count()`.
    fn hull(&self, i: usize) -> Option<&ConvexHullRecord>;

    /// Asks the engine to abandon the submitted job.
    ///
    /// The job's results, if any, are discarded.
    fn cancel(&mut self) {}

    /// Frees the resources held by the engine.
    ///
    /// This is called exactly once by the driver, after every hull record was copied out or
    /// after the decomposition failed.
    fn release(&mut self) {}
}

impl<E: DecompositionEngine + ?Sized> DecompositionEngine for Box<E> {
    fn compute(&mut self, points: &[Point], triangles: &[[u32; 3]]) -> Result<()> {
        (**self).compute(points, triangles)
    }

    fn poll(&mut self) -> EngineStatus {
        (**self).poll()
    }

    fn hull_count(&self) -> usize {
        (**self).hull_count()
    }

    fn hull(&self, i: usize) -> Option<&ConvexHullRecord> {
        (**self).hull(i)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }

    fn release(&mut self) {
        (**self).release()
    }
}
