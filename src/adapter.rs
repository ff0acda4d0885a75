//! The array-based entry points of the crate.

use crate::driver::{self, CancellationToken, DriverOptions};
use crate::engine::{DecompositionEngine, EngineParameters, ParryEngine};
use crate::error::Result;
use crate::input::InputMesh;
use crate::math::Real;
use crate::output::{self, HullSoup, OutputHull};

/// The complete configuration of a [`DecompositionAdapter`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DecompositionConfig {
    /// Parameters of the default engine.
    pub engine: EngineParameters,
    /// How the driver waits for the engine.
    pub driver: DriverOptions,
}

/// Prepares meshes for a convex decomposition engine, runs it, and repackages its output.
///
/// Each call creates its own engine, so one adapter can be shared by several threads.
/// Cancellation is requested per call through the `*_cancellable` methods: a cancelled
/// call leaves the adapter usable for the next ones.
#[derive(Clone, Debug, Default)]
pub struct DecompositionAdapter {
    config: DecompositionConfig,
}

impl DecompositionAdapter {
    /// Creates an adapter with the given configuration.
    pub fn new(config: DecompositionConfig) -> Self {
        Self { config }
    }

    /// The configuration of this adapter.
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Decomposes the mesh described by an `(N, 3)` point array and a fixed-stride
    /// `[3, i0, i1, i2]` face buffer.
    ///
    /// Returns one locally-indexed hull per convex piece, in engine order. An empty vector
    /// is a valid result (for example for a flat input mesh).
    pub fn compute_decomposition(
        &self,
        points: &[[Real; 3]],
        faces: &[u32],
    ) -> Result<Vec<OutputHull>> {
        self.compute_decomposition_cancellable(points, faces, &CancellationToken::new())
    }

    /// Same as [`Self::compute_decomposition`], but gives up with
    /// [`DecompositionError::Cancelled`](crate::DecompositionError::Cancelled) once
    /// `cancellation` is cancelled.
    pub fn compute_decomposition_cancellable(
        &self,
        points: &[[Real; 3]],
        faces: &[u32],
        cancellation: &CancellationToken,
    ) -> Result<Vec<OutputHull>> {
        let mesh = InputMesh::from_strided_faces(points, faces)?;
        self.compute_with_engine_cancellable(self.create_engine(), &mesh, cancellation)
    }

    /// Decomposes the mesh and returns all hulls as one globally-indexed polygon soup.
    pub fn compute_combined(&self, points: &[[Real; 3]], faces: &[u32]) -> Result<HullSoup> {
        let mesh = InputMesh::from_strided_faces(points, faces)?;
        let engine = driver::drive(
            self.create_engine(),
            &mesh,
            &self.config.driver,
            &CancellationToken::new(),
        )?;
        output::assemble_combined(&*engine)
    }

    /// Decomposes an already validated mesh with the default engine.
    pub fn compute_mesh(&self, mesh: &InputMesh) -> Result<Vec<OutputHull>> {
        self.compute_with_engine(self.create_engine(), mesh)
    }

    /// Decomposes an already validated mesh with a custom engine.
    ///
    /// The engine is released before this function returns, whatever its outcome.
    pub fn compute_with_engine<E: DecompositionEngine>(
        &self,
        engine: E,
        mesh: &InputMesh,
    ) -> Result<Vec<OutputHull>> {
        self.compute_with_engine_cancellable(engine, mesh, &CancellationToken::new())
    }

    /// Same as [`Self::compute_with_engine`], watching `cancellation` while the engine runs.
    pub fn compute_with_engine_cancellable<E: DecompositionEngine>(
        &self,
        engine: E,
        mesh: &InputMesh,
        cancellation: &CancellationToken,
    ) -> Result<Vec<OutputHull>> {
        let engine = driver::drive(engine, mesh, &self.config.driver, cancellation)?;
        output::assemble_hulls(&*engine)
    }

    fn create_engine(&self) -> ParryEngine {
        ParryEngine::new(self.config.engine.clone())
    }
}

/// Decomposes a mesh with the default configuration.
///
/// See [`DecompositionAdapter::compute_decomposition`].
pub fn compute_decomposition(points: &[[Real; 3]], faces: &[u32]) -> Result<Vec<OutputHull>> {
    DecompositionAdapter::default().compute_decomposition(points, faces)
}
