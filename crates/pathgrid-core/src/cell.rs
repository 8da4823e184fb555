//! Per-cell search state: [`CellState`] and the [`Cell`] record.

/// Display/search state of a single grid cell.
///
/// `Empty`, `Start`, `Destination` and `Obstacle` are assigned by the
/// generator before a search begins; `Visited` and `OnPath` are applied by
/// the search engine during a run and reverted to `Empty` when the grid is
/// reset. A cell holds exactly one state at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Start,
    Destination,
    Obstacle,
    /// Expanded by the search during the current run.
    Visited,
    /// Part of the reconstructed result path.
    OnPath,
}

impl CellState {
    /// Whether the search may enter a cell in this state.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, CellState::Obstacle)
    }

    /// Whether this state survives a search reset.
    #[inline]
    pub const fn baseline(self) -> bool {
        matches!(
            self,
            CellState::Empty | CellState::Start | CellState::Destination | CellState::Obstacle
        )
    }
}

/// One cell of the search arena: display state plus mutable search
/// metadata.
///
/// The selection priority `f = g + h` is never stored; it is recomputed by
/// [`Cell::f`] so it can not drift out of sync when `g` or `h` change.
/// `parent` is an index into the owning grid's arena, pointing at the
/// predecessor on the best path found so far.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub state: CellState,
    /// Accumulated path cost from the start cell.
    pub g: f64,
    /// Heuristic estimate of the remaining cost to the destination.
    pub h: f64,
    /// Arena index of the predecessor cell, if any.
    pub parent: Option<usize>,
}

impl Cell {
    /// A fresh cell in the given state with default search metadata.
    pub const fn with_state(state: CellState) -> Self {
        Self {
            state,
            g: f64::INFINITY,
            h: 0.0,
            parent: None,
        }
    }

    /// Selection priority: `g + h`.
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Reset search metadata to run defaults, reverting non-baseline
    /// states to `Empty`.
    pub fn reset(&mut self) {
        if !self.state.baseline() {
            self.state = CellState::Empty;
        }
        self.g = f64::INFINITY;
        self.h = 0.0;
        self.parent = None;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::with_state(CellState::Empty)
    }
}
