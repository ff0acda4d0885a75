use crate::math::Real;
use parry::transformation::vhacd::VHACDParameters;

/// How an engine schedules the decomposition work.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ExecutionMode {
    /// The whole decomposition runs within [`DecompositionEngine::compute`](super::DecompositionEngine::compute).
    Synchronous,
    /// The decomposition runs on a background thread while the driver polls for completion.
    #[default]
    Asynchronous,
}

/// Where the vertices of the produced convex hulls come from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum HullSource {
    /// Hulls of the input triangles clipped to each convex part.
    ///
    /// Hull vertices lie on the input mesh, so a part made of whole input faces gets the
    /// exact input coordinates back.
    #[default]
    Exact,
    /// Hulls of the voxels making each convex part.
    Voxelized {
        /// Only one voxel out of `downsampling` contributes to the hull. Zero is read as one.
        downsampling: u32,
    },
}

/// The parameters of a [`ParryEngine`](super::ParryEngine).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct EngineParameters {
    /// The parameters of the VHACD algorithm, forwarded untouched.
    pub vhacd: VHACDParameters,
    /// How the decomposition work is scheduled.
    pub execution: ExecutionMode,
    /// Where the vertices of the produced hulls come from.
    pub hull_source: HullSource,
    /// Hulls enclosing less than this fraction of the input bounding box volume are
    /// discarded as degenerate.
    ///
    /// Hulls with less than 4 vertices are always discarded.
    pub min_relative_volume: Real,
}

/// The default concavity threshold of [`EngineParameters`].
///
/// The default of [`VHACDParameters`] is too strict for voxelized surfaces: it splits an
/// already convex box into several parts.
pub const DEFAULT_CONCAVITY: Real = 0.05;

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            vhacd: VHACDParameters {
                concavity: DEFAULT_CONCAVITY,
                ..VHACDParameters::default()
            },
            execution: ExecutionMode::Asynchronous,
            hull_source: HullSource::Exact,
            min_relative_volume: 1.0e-10,
        }
    }
}

impl EngineParameters {
    /// Default parameters with the given execution mode.
    pub fn with_execution(execution: ExecutionMode) -> Self {
        Self {
            execution,
            ..Self::default()
        }
    }
}
