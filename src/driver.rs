//! Submission of a decomposition job and wait for its completion.

use crate::engine::{DecompositionEngine, EngineStatus};
use crate::error::{DecompositionError, Result};
use crate::input::InputMesh;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// A flag shared between a running decomposition and the threads allowed to cancel it.
///
/// Cloning the token yields a handle to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A token that has not been cancelled yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the cancellation of every decomposition watching this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Has [`Self::cancel`] been called on this token or one of its clones?
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Controls how the driver waits for an engine to complete.
///
/// The timeout, like the cancellation token given to [`drive`], is only checked between
/// two polls. A synchronous engine completes within
/// [`DecompositionEngine::compute`], so once submitted its job can neither time out nor
/// be cancelled.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DriverOptions {
    /// Time slept between two readiness polls.
    pub poll_interval: Duration,
    /// Maximum time to wait for the engine. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_micros(10),
            timeout: None,
        }
    }
}

/// Owns an engine and releases it when dropped.
///
/// The guard dereferences to the engine, so completed hull records can be read through
/// it. Since hull records are borrowed from the engine, they cannot outlive the guard.
pub struct EngineGuard<E: DecompositionEngine> {
    engine: E,
}

impl<E: DecompositionEngine> EngineGuard<E> {
    /// Takes ownership of `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }
}

impl<E: DecompositionEngine> Deref for EngineGuard<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.engine
    }
}

impl<E: DecompositionEngine> DerefMut for EngineGuard<E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

impl<E: DecompositionEngine> Drop for EngineGuard<E> {
    fn drop(&mut self) {
        log::trace!("Releasing the decomposition engine.");
        self.engine.release();
    }
}

/// Submits `mesh` to `engine` and blocks until the engine completes.
///
/// On success, the returned guard holds the completed engine. On failure, the engine is
/// released before this function returns: after being cancelled if the wait timed out or
/// was cancelled.
///
/// `cancellation` is checked before the job is submitted and between two polls.
///
/// A completed engine with zero hulls is a success.
pub fn drive<E: DecompositionEngine>(
    engine: E,
    mesh: &InputMesh,
    options: &DriverOptions,
    cancellation: &CancellationToken,
) -> Result<EngineGuard<E>> {
    let mut guard = EngineGuard::new(engine);
    let start = Instant::now();

    if cancellation.is_cancelled() {
        return Err(DecompositionError::Cancelled);
    }

    guard.compute(mesh.points(), mesh.triangles())?;

    loop {
        match guard.poll() {
            EngineStatus::Ready => {
                log::debug!(
                    "Convex decomposition completed with {} convex hulls in {:?}.",
                    guard.hull_count(),
                    start.elapsed()
                );
                return Ok(guard);
            }
            EngineStatus::Failed(msg) => return Err(DecompositionError::EngineFailure(msg)),
            EngineStatus::Running => {}
        }

        if cancellation.is_cancelled() {
            guard.cancel();
            return Err(DecompositionError::Cancelled);
        }

        if let Some(timeout) = options.timeout {
            if start.elapsed() >= timeout {
                log::debug!("Convex decomposition timed out after {:?}.", timeout);
                guard.cancel();
                return Err(DecompositionError::Timeout(timeout));
            }
        }

        thread::sleep(options.poll_interval);
        thread::yield_now();
    }
}
