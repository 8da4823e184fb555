//! **pathgrid-search** — the A* search engine and its paced step
//! scheduler.
//!
//! The [`Engine`] is a synchronous state machine: one [`Engine::step`]
//! call expands a single cell (or marks a single path cell while
//! backtracking) and reports what it did, so the algorithm stays
//! unit-testable without timers. Animation is layered on top by the
//! [`Runner`], which calls `step` on a background thread, forwards
//! [`pathgrid_core::CellUpdate`]s to the renderer and sleeps between
//! steps, honouring a cooperative cancellation [`Context`].
//!
//! Cost models are configuration, not code: see [`CostPolicy`] for the
//! admissible Chebyshev policy and the deliberately inadmissible weighted
//! octile policy, and [`RelaxPolicy`] for the frontier relaxation
//! variants.

mod engine;
mod error;
mod frontier;
mod policy;
mod runner;

pub use engine::{Engine, Outcome, Status, StepEvent};
pub use error::SearchError;
pub use frontier::{Frontier, Visited};
pub use policy::{CostPolicy, RelaxPolicy, DEFAULT_OCTILE_WEIGHT};
pub use runner::{Context, Pacing, RunHandle, RunResult, Runner};
