//! Paced execution: the step scheduler and cooperative cancellation.
//!
//! The [`Runner`] drives an [`Engine`] on a background thread, sleeping a
//! configured interval between steps and forwarding change events to the
//! rendering collaborator through an `mpsc` channel. Starting a new run
//! cancels any run in flight and joins its thread before the new one
//! spawns, so no two pacing loops ever run concurrently against the same
//! grid.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::trace;

use pathgrid_core::CellUpdate;

use crate::engine::{Engine, Outcome, StepEvent};
use crate::error::SearchError;

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// The pacing loop checks it at every suspension point and exits without
/// completing remaining steps once cancellation is requested.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

/// Animation pacing configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pacing {
    /// Engine steps per second of wall-clock time.
    pub steps_per_second: f64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            steps_per_second: 3.0,
        }
    }
}

impl Pacing {
    /// The sleep interval between steps. Non-positive rates disable
    /// pacing entirely.
    pub fn interval(&self) -> Duration {
        if self.steps_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / self.steps_per_second)
        } else {
            Duration::ZERO
        }
    }
}

/// The result a pacing thread exits with: the engine (so the caller can
/// inspect or reuse its grid) plus the run's result. `Ok(None)` means the
/// run was cancelled before reaching a terminal state.
pub type RunResult = (Engine, Result<Option<Outcome>, SearchError>);

/// Handle to a paced run in flight.
#[derive(Debug)]
pub struct RunHandle {
    ctx: Context,
    handle: JoinHandle<RunResult>,
}

impl RunHandle {
    /// Request cancellation; the loop exits at its next suspension point.
    pub fn cancel(&self) {
        self.ctx.cancel();
    }

    /// Whether the pacing thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the run reaches a terminal state or observes
    /// cancellation.
    pub fn finish(self) -> RunResult {
        self.handle.join().expect("pacing thread panicked")
    }
}

/// Drives at most one paced run at a time.
#[derive(Debug, Default)]
pub struct Runner {
    current: Option<RunHandle>,
}

impl Runner {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Whether a paced run is currently in flight.
    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Begin a paced run, superseding any run in flight.
    ///
    /// The engine is started synchronously so configuration errors
    /// surface immediately; only then does the pacing thread spawn. Change
    /// events (including the initial full redraw) are forwarded through
    /// `sink`; a disconnected receiver is tolerated and the run keeps
    /// going.
    pub fn start_run(
        &mut self,
        mut engine: Engine,
        pacing: Pacing,
        sink: Sender<CellUpdate>,
    ) -> Result<(), SearchError> {
        // Supersede: the previous run's engine and partial state are
        // discarded.
        self.cancel_run();

        engine.start()?;

        let ctx = Context::new();
        let loop_ctx = ctx.clone();
        let interval = pacing.interval();

        let handle = thread::spawn(move || {
            forward(&sink, &mut engine);
            loop {
                if loop_ctx.is_done() {
                    trace!("paced run superseded, exiting");
                    return (engine, Ok(None));
                }
                match engine.step() {
                    Ok(ev) => {
                        forward(&sink, &mut engine);
                        if let StepEvent::Finished(outcome) = ev {
                            return (engine, Ok(Some(outcome)));
                        }
                    }
                    Err(e) => return (engine, Err(e)),
                }
                thread::sleep(interval);
            }
        });

        self.current = Some(RunHandle { ctx, handle });
        Ok(())
    }

    /// Force-cancel the active run, identically to how a new run
    /// supersedes it. Returns the run's result, or `None` if no run was
    /// active.
    pub fn cancel_run(&mut self) -> Option<RunResult> {
        let handle = self.current.take()?;
        handle.cancel();
        Some(handle.finish())
    }

    /// Wait for the active run to finish naturally.
    pub fn finish(&mut self) -> Option<RunResult> {
        self.current.take().map(RunHandle::finish)
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.cancel_run();
    }
}

fn forward(sink: &Sender<CellUpdate>, engine: &mut Engine) {
    for update in engine.take_updates() {
        // The renderer may have detached; that is not the run's problem.
        let _ = sink.send(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::CostPolicy;
    use pathgrid_core::{CellState, Grid, Point};
    use std::sync::mpsc;

    fn fast() -> Pacing {
        Pacing {
            steps_per_second: 10_000.0,
        }
    }

    #[test]
    fn paced_run_completes_and_streams_updates() {
        let grid = Grid::new(6).unwrap();
        let engine = Engine::new(grid, CostPolicy::Chebyshev);
        let (tx, rx) = mpsc::channel();
        let mut runner = Runner::new();
        runner.start_run(engine, fast(), tx).unwrap();

        let (engine, result) = runner.finish().unwrap();
        let outcome = result.unwrap().expect("run should reach a terminal state");
        let Outcome::Succeeded(path) = outcome else {
            panic!("expected success");
        };
        assert_eq!(path.first(), Some(&Point::ZERO));
        assert_eq!(path.last(), Some(&engine.grid().destination()));

        let updates: Vec<_> = rx.try_iter().collect();
        assert!(!updates.is_empty());
        assert!(updates.iter().any(|u| u.state == CellState::OnPath));
    }

    #[test]
    fn new_run_supersedes_old_one() {
        let (tx, _rx) = mpsc::channel();
        let mut runner = Runner::new();

        // Slow run that cannot finish on its own in test time.
        let slow = Engine::new(Grid::new(16).unwrap(), CostPolicy::Chebyshev);
        runner
            .start_run(slow, Pacing { steps_per_second: 2.0 }, tx.clone())
            .unwrap();
        assert!(runner.is_running());

        let fast_engine = Engine::new(Grid::new(4).unwrap(), CostPolicy::Chebyshev);
        runner.start_run(fast_engine, fast(), tx).unwrap();

        let (_, result) = runner.finish().unwrap();
        match result.unwrap() {
            Some(Outcome::Succeeded(path)) => assert_eq!(path.len(), 4),
            other => panic!("expected the superseding run to succeed, got {other:?}"),
        }
    }

    #[test]
    fn cancel_returns_engine_without_outcome() {
        let (tx, _rx) = mpsc::channel();
        let mut runner = Runner::new();
        let engine = Engine::new(Grid::new(16).unwrap(), CostPolicy::Chebyshev);
        runner
            .start_run(engine, Pacing { steps_per_second: 2.0 }, tx)
            .unwrap();

        let (engine, result) = runner.cancel_run().unwrap();
        assert_eq!(result.unwrap(), None);
        // Partial state is discarded by the next start(), not by cancel.
        assert!(engine.visited_len() <= engine.grid().len());
        assert!(runner.cancel_run().is_none());
    }

    #[test]
    fn config_errors_surface_before_spawning() {
        let mut grid = Grid::new(4).unwrap();
        grid.set_state(Point::ZERO, CellState::Obstacle);
        let engine = Engine::new(grid, CostPolicy::Chebyshev);
        let (tx, _rx) = mpsc::channel();
        let mut runner = Runner::new();
        assert_eq!(
            runner.start_run(engine, fast(), tx),
            Err(SearchError::StartIsObstacle(Point::ZERO))
        );
        assert!(!runner.is_running());
    }

    #[test]
    fn pacing_interval() {
        assert_eq!(
            Pacing { steps_per_second: 4.0 }.interval(),
            Duration::from_millis(250)
        );
        assert_eq!(
            Pacing { steps_per_second: 0.0 }.interval(),
            Duration::ZERO
        );
    }
}
