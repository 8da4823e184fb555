//! The search engine: a stepwise A* state machine over a [`Grid`].
//!
//! `Idle → Running → {Succeeded, Exhausted}`. While `Running` the engine
//! is in one of two phases: searching (each step expands one frontier
//! cell) or backtracking (each step marks one cell of the result path).
//! Keeping both phases stepwise lets the scheduler pace every visible
//! mutation against wall-clock time.

use log::debug;

use pathgrid_core::{CellState, CellUpdate, Grid, Point};

use crate::error::SearchError;
use crate::frontier::{Frontier, Visited};
use crate::policy::{CostPolicy, RelaxPolicy};

/// Lifecycle state of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Succeeded,
    Exhausted,
}

/// Terminal result of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// A path was found; coordinates ordered start → destination,
    /// endpoints included.
    Succeeded(Vec<Point>),
    /// The frontier emptied before the destination was selected: no path
    /// exists under the current obstacles. A normal outcome, not an
    /// error.
    Exhausted,
}

/// What a single [`Engine::step`] call did.
#[derive(Clone, Debug, PartialEq)]
pub enum StepEvent {
    /// A cell moved from the frontier to the visited set.
    Expanded(Point),
    /// A result-path cell was marked during backtracking.
    PathMarked(Point),
    /// The run reached a terminal state.
    Finished(Outcome),
}

#[derive(Copy, Clone, Debug)]
enum Phase {
    Search,
    Backtrack { cur: usize, remaining: usize },
}

/// The search engine. Owns the grid for the duration of a run and is the
/// only mutator of cell state.
#[derive(Debug)]
pub struct Engine {
    grid: Grid,
    policy: CostPolicy,
    relax: RelaxPolicy,
    frontier: Frontier,
    visited: Visited,
    status: Status,
    phase: Phase,
    path: Vec<Point>,
    updates: Vec<CellUpdate>,
    nbuf: Vec<Point>,
}

impl Engine {
    /// Create an engine over `grid` with the default relaxation policy.
    pub fn new(grid: Grid, policy: CostPolicy) -> Self {
        let len = grid.len();
        Self {
            grid,
            policy,
            relax: RelaxPolicy::default(),
            frontier: Frontier::new(len),
            visited: Visited::new(len),
            status: Status::Idle,
            phase: Phase::Search,
            path: Vec::new(),
            updates: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Select the relaxation policy (builder).
    pub fn with_relax_policy(mut self, relax: RelaxPolicy) -> Self {
        self.relax = relax;
        self
    }

    /// Begin a run, discarding any run in progress.
    ///
    /// Validates the configuration, resets all search metadata, seeds the
    /// start cell and clears both working sets, so nothing from a
    /// previous (possibly cancelled) run remains visible. Emits a full
    /// redraw's worth of updates.
    pub fn start(&mut self) -> Result<(), SearchError> {
        let start = self.grid.start();
        let dest = self.grid.destination();
        if self.grid.state(start) == Some(CellState::Obstacle) {
            return Err(SearchError::StartIsObstacle(start));
        }
        if self.grid.state(dest) == Some(CellState::Obstacle) {
            return Err(SearchError::DestinationIsObstacle(dest));
        }

        debug!(
            "starting run: size={} policy={:?} relax={:?}",
            self.grid.size(),
            self.policy,
            self.relax
        );

        self.frontier.clear();
        self.visited.clear();
        self.path.clear();
        self.phase = Phase::Search;
        self.grid.reset_search();

        self.updates.clear();
        for idx in 0..self.grid.len() {
            self.note(idx);
        }

        let si = self.grid.start_index();
        let h = self.policy.heuristic(start, dest);
        let cell = self.grid.cell_at_mut(si);
        cell.g = 0.0;
        cell.h = h;
        self.frontier.insert(si);
        self.note(si);

        self.status = Status::Running;
        Ok(())
    }

    /// Advance the run by one unit of visible work.
    ///
    /// Calling `step` after a terminal state re-reports the final
    /// [`StepEvent::Finished`].
    pub fn step(&mut self) -> Result<StepEvent, SearchError> {
        match self.status {
            Status::Idle => return Err(SearchError::NotStarted),
            Status::Succeeded => {
                return Ok(StepEvent::Finished(Outcome::Succeeded(self.path.clone())));
            }
            Status::Exhausted => return Ok(StepEvent::Finished(Outcome::Exhausted)),
            Status::Running => {}
        }
        match self.phase {
            Phase::Search => self.search_step(),
            Phase::Backtrack { cur, remaining } => self.backtrack_step(cur, remaining),
        }
    }

    /// Run to completion without pacing. Convenience for callers that do
    /// not animate.
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        self.start()?;
        loop {
            if let StepEvent::Finished(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    fn search_step(&mut self) -> Result<StepEvent, SearchError> {
        let Some(ci) = self.frontier.select_min(|i| self.grid.cell_at(i).f()) else {
            self.status = Status::Exhausted;
            debug!("frontier exhausted: no path exists");
            return Ok(StepEvent::Finished(Outcome::Exhausted));
        };

        if ci == self.grid.destination_index() {
            // Destination selected: switch to stepwise path
            // reconstruction, bounded by the arena size.
            self.phase = Phase::Backtrack {
                cur: ci,
                remaining: self.grid.len(),
            };
            return self.backtrack_step(ci, self.grid.len());
        }

        self.frontier.remove(ci);
        self.visited.insert(ci);
        let cp = self.grid.point_of(ci);
        if self.grid.cell_at(ci).state == CellState::Empty {
            self.grid.cell_at_mut(ci).state = CellState::Visited;
        }
        self.note(ci);

        let current_g = self.grid.cell_at(ci).g;
        let dest = self.grid.destination();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        self.grid.neighbors(cp, &mut nbuf);
        for &np in &nbuf {
            let Some(ni) = self.grid.index_of(np) else {
                continue;
            };
            if !self.grid.cell_at(ni).state.passable() {
                continue;
            }
            if self.visited.contains(ni) {
                continue;
            }
            let candidate = current_g + self.policy.step_cost(cp, np);
            if self.frontier.contains(ni) {
                if self.relax == RelaxPolicy::Relax && candidate < self.grid.cell_at(ni).g {
                    let cell = self.grid.cell_at_mut(ni);
                    cell.g = candidate;
                    cell.parent = Some(ci);
                    self.note(ni);
                }
            } else {
                let h = self.policy.heuristic(np, dest);
                let cell = self.grid.cell_at_mut(ni);
                cell.g = candidate;
                cell.h = h;
                cell.parent = Some(ci);
                self.frontier.insert(ni);
                self.note(ni);
            }
        }
        self.nbuf = nbuf;

        Ok(StepEvent::Expanded(cp))
    }

    fn backtrack_step(&mut self, cur: usize, remaining: usize) -> Result<StepEvent, SearchError> {
        let p = self.grid.point_of(cur);
        if remaining == 0 {
            return Err(SearchError::BrokenParentChain { at: p });
        }

        self.path.push(p);
        let state = self.grid.cell_at(cur).state;
        if !matches!(state, CellState::Start | CellState::Destination) {
            self.grid.cell_at_mut(cur).state = CellState::OnPath;
            self.note(cur);
        }

        if cur == self.grid.start_index() {
            self.path.reverse();
            self.status = Status::Succeeded;
            debug!("run succeeded: path of {} cells", self.path.len());
            return Ok(StepEvent::Finished(Outcome::Succeeded(self.path.clone())));
        }

        match self.grid.cell_at(cur).parent {
            Some(parent) => {
                self.phase = Phase::Backtrack {
                    cur: parent,
                    remaining: remaining - 1,
                };
                Ok(StepEvent::PathMarked(p))
            }
            None => Err(SearchError::BrokenParentChain { at: p }),
        }
    }

    fn note(&mut self, idx: usize) {
        let pos = self.grid.point_of(idx);
        self.updates
            .push(CellUpdate::snapshot(pos, self.grid.cell_at(idx)));
    }

    /// Take the change events accumulated since the last call.
    pub fn take_updates(&mut self) -> Vec<CellUpdate> {
        std::mem::take(&mut self.updates)
    }

    /// Current lifecycle state.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The configured cost policy.
    #[inline]
    pub fn policy(&self) -> CostPolicy {
        self.policy
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Give the grid back to the caller.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The result path, start → destination. Empty unless `Succeeded`.
    #[inline]
    pub fn path(&self) -> &[Point] {
        if self.status == Status::Succeeded {
            &self.path
        } else {
            &[]
        }
    }

    /// Whether `p` is currently in the frontier.
    pub fn frontier_contains(&self, p: Point) -> bool {
        self.grid
            .index_of(p)
            .is_some_and(|i| self.frontier.contains(i))
    }

    /// Whether `p` has been expanded this run.
    pub fn visited_contains(&self, p: Point) -> bool {
        self.grid
            .index_of(p)
            .is_some_and(|i| self.visited.contains(i))
    }

    /// Number of cells in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of expanded cells.
    #[inline]
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }
}
