use super::{ConvexHullRecord, DecompositionEngine, EngineParameters, EngineStatus};
use super::{ExecutionMode, HullSource};
use crate::error::{DecompositionError, Result};
use crate::math::{Point, Real};
use parry::transformation::vhacd::VHACD;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

type JobResult = std::result::Result<Vec<ConvexHullRecord>, String>;

enum JobState {
    Idle,
    Running(Receiver<JobResult>),
    Ready,
    Failed(String),
    Released,
}

/// A decomposition engine running the VHACD implementation of `parry3d-f64`.
///
/// In [`ExecutionMode::Asynchronous`] mode, each call to [`DecompositionEngine::compute`]
/// copies its input and runs the decomposition on a dedicated thread. Cancelling the
/// engine detaches that thread: its result is dropped once it completes.
///
/// Panics raised by the decomposition are caught and reported as
/// [`EngineStatus::Failed`].
pub struct ParryEngine {
    params: EngineParameters,
    state: JobState,
    hulls: Vec<ConvexHullRecord>,
}

impl ParryEngine {
    /// Creates an idle engine with the given parameters.
    pub fn new(params: EngineParameters) -> Self {
        Self {
            params,
            state: JobState::Idle,
            hulls: Vec::new(),
        }
    }

    /// The parameters of this engine.
    pub fn parameters(&self) -> &EngineParameters {
        &self.params
    }

    fn finish(&mut self, result: JobResult) {
        match result {
            Ok(hulls) => {
                self.hulls = hulls;
                self.state = JobState::Ready;
            }
            Err(msg) => {
                self.hulls.clear();
                self.state = JobState::Failed(msg);
            }
        }
    }
}

impl Default for ParryEngine {
    fn default() -> Self {
        Self::new(EngineParameters::default())
    }
}

impl DecompositionEngine for ParryEngine {
    fn compute(&mut self, points: &[Point], triangles: &[[u32; 3]]) -> Result<()> {
        self.hulls.clear();

        match self.params.execution {
            ExecutionMode::Synchronous => {
                let result = decompose(&self.params, points, triangles);
                self.finish(result);
            }
            ExecutionMode::Asynchronous => {
                let (sender, receiver) = mpsc::channel();
                let params = self.params.clone();
                let points = points.to_vec();
                let triangles = triangles.to_vec();

                let _worker = thread::Builder::new()
                    .name("decomp3d-vhacd".to_string())
                    .spawn(move || {
                        // The receiver is gone if the job was cancelled.
                        let _ = sender.send(decompose(&params, &points, &triangles));
                    })
                    .map_err(|e| {
                        DecompositionError::EngineFailure(format!(
                            "failed to start the decomposition thread: {e}"
                        ))
                    })?;

                self.state = JobState::Running(receiver);
            }
        }

        Ok(())
    }

    fn poll(&mut self) -> EngineStatus {
        let received = match &self.state {
            JobState::Running(receiver) => Some(receiver.try_recv()),
            _ => None,
        };

        match received {
            Some(Ok(result)) => self.finish(result),
            Some(Err(TryRecvError::Empty)) => return EngineStatus::Running,
            Some(Err(TryRecvError::Disconnected)) => {
                self.state = JobState::Failed(
                    "the decomposition thread terminated without a result".to_string(),
                )
            }
            None => {}
        }

        match &self.state {
            JobState::Ready => EngineStatus::Ready,
            JobState::Failed(msg) => EngineStatus::Failed(msg.clone()),
            JobState::Running(_) => EngineStatus::Running,
            JobState::Idle => EngineStatus::Failed("no decomposition job was submitted".to_string()),
            JobState::Released => EngineStatus::Failed("the engine was released".to_string()),
        }
    }

    fn hull_count(&self) -> usize {
        match self.state {
            JobState::Ready => self.hulls.len(),
            _ => 0,
        }
    }

    fn hull(&self, i: usize) -> Option<&ConvexHullRecord> {
        match self.state {
            JobState::Ready => self.hulls.get(i),
            _ => None,
        }
    }

    fn cancel(&mut self) {
        if let JobState::Running(_) = self.state {
            log::debug!("Detaching a cancelled decomposition job.");
            self.state = JobState::Idle;
        }
    }

    fn release(&mut self) {
        self.hulls = Vec::new();
        self.state = JobState::Released;
    }
}

fn decompose(params: &EngineParameters, points: &[Point], triangles: &[[u32; 3]]) -> JobResult {
    if triangles.is_empty() {
        return Ok(Vec::new());
    }

    let raw_hulls = panic::catch_unwind(AssertUnwindSafe(|| {
        let keep_voxel_to_primitives_map = params.hull_source == HullSource::Exact;
        let decomposition = VHACD::decompose(
            &params.vhacd,
            points,
            triangles,
            keep_voxel_to_primitives_map,
        );

        match params.hull_source {
            HullSource::Exact => decomposition.compute_exact_convex_hulls(points, triangles),
            HullSource::Voxelized { downsampling } => {
                decomposition.compute_convex_hulls(downsampling.max(1))
            }
        }
    }))
    .map_err(panic_message)?;

    let min_volume = params.min_relative_volume * bounding_cube_volume(points);

    Ok(raw_hulls
        .into_iter()
        .enumerate()
        .filter_map(|(i, (vertices, indices))| {
            let record = ConvexHullRecord::new(vertices, indices);

            if record.points.len() < 4 || record.signed_volume().abs() <= min_volume {
                log::debug!(
                    "Discarding degenerate convex hull {} ({} vertices, {} triangles).",
                    i,
                    record.points.len(),
                    record.triangles.len()
                );
                None
            } else {
                Some(record)
            }
        })
        .collect())
}

// Volume of the cube enclosing the largest extent of the points' AABB.
fn bounding_cube_volume(points: &[Point]) -> Real {
    let Some(first) = points.first() else {
        return 0.0;
    };

    let (mins, maxs) = points
        .iter()
        .fold((*first, *first), |(mins, maxs), pt| (mins.inf(pt), maxs.sup(pt)));
    (maxs - mins).max().powi(3)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    let msg = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    format!("the decomposition panicked: {msg}")
}
