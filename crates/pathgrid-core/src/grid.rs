//! The [`Grid`] arena: a square map of [`Cell`]s addressed by coordinate.
//!
//! Cells live in a flat `Vec` indexed `y * size + x`; parent links between
//! cells are arena indices rather than references, so the back-pointer
//! graph built during a search involves no shared ownership.

use std::fmt;

use crate::cell::{Cell, CellState};
use crate::geom::Point;

/// Error constructing a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Grids must be at least 2×2 so start and destination are distinct.
    InvalidSize(i32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidSize(n) => write!(f, "invalid grid size {n}: must be at least 2"),
        }
    }
}

impl std::error::Error for GridError {}

/// A square grid of [`Cell`]s with a fixed start and destination.
///
/// The topology (size, obstacles, start, destination) is immutable during
/// a search; only the search engine mutates cell metadata. Cloning yields
/// an independent copy, which is how a caller re-runs a search on an
/// unmodified grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    size: i32,
    start: Point,
    destination: Point,
}

impl Grid {
    /// Create an empty `size`×`size` grid with the start at `(0, 0)` and
    /// the destination at `(size-1, size-1)`.
    pub fn new(size: i32) -> Result<Self, GridError> {
        if size < 2 {
            return Err(GridError::InvalidSize(size));
        }
        let mut cells = vec![Cell::default(); (size * size) as usize];
        let start = Point::ZERO;
        let destination = Point::new(size - 1, size - 1);
        cells[0].state = CellState::Start;
        cells[(size * size - 1) as usize].state = CellState::Destination;
        Ok(Self {
            cells,
            size,
            start,
            destination,
        })
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Number of cells in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies within `[0, size)²`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.size && p.y < self.size
    }

    /// Convert a point to its arena index. Returns `None` out of bounds.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y * self.size + p.x) as usize)
    }

    /// Convert an arena index back to a point.
    #[inline]
    pub fn point_of(&self, idx: usize) -> Point {
        Point::new(idx as i32 % self.size, idx as i32 / self.size)
    }

    /// The designated start cell position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// The designated destination cell position.
    #[inline]
    pub fn destination(&self) -> Point {
        self.destination
    }

    /// Arena index of the start cell.
    #[inline]
    pub fn start_index(&self) -> usize {
        (self.start.y * self.size + self.start.x) as usize
    }

    /// Arena index of the destination cell.
    #[inline]
    pub fn destination_index(&self) -> usize {
        (self.destination.y * self.size + self.destination.x) as usize
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.index_of(p).map(|i| &self.cells[i])
    }

    /// The cell at arena index `idx`.
    #[inline]
    pub fn cell_at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable access to the cell at arena index `idx`.
    #[inline]
    pub fn cell_at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// The state of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(|c| c.state)
    }

    /// Set the state of the cell at `p`. No-op out of bounds.
    pub fn set_state(&mut self, p: Point, state: CellState) {
        if let Some(i) = self.index_of(p) {
            self.cells[i].state = state;
        }
    }

    /// Append the in-bounds compass neighbors of `p` into `buf`.
    ///
    /// Order is fixed: Δx outer, Δy inner, both ascending. Neighbor order
    /// feeds the frontier's insertion order and therefore participates in
    /// cost tie-breaking, so it must stay deterministic.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.clear();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = p.shift(dx, dy);
                if self.contains(n) {
                    buf.push(n);
                }
            }
        }
    }

    /// Restore every cell's search metadata to run defaults.
    ///
    /// `Visited` and `OnPath` states revert to `Empty`; start, destination
    /// and obstacles are preserved.
    pub fn reset_search(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    /// Row-major iterator over `(Point, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (self.point_of(i), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_places_endpoints() {
        let g = Grid::new(4).unwrap();
        assert_eq!(g.state(Point::ZERO), Some(CellState::Start));
        assert_eq!(g.state(Point::new(3, 3)), Some(CellState::Destination));
        assert_eq!(g.start(), Point::ZERO);
        assert_eq!(g.destination(), Point::new(3, 3));
        assert_eq!(g.len(), 16);
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(Grid::new(0), Err(GridError::InvalidSize(0)));
        assert_eq!(Grid::new(1), Err(GridError::InvalidSize(1)));
        assert_eq!(Grid::new(-3), Err(GridError::InvalidSize(-3)));
    }

    #[test]
    fn cell_lookup_fails_out_of_bounds() {
        let g = Grid::new(3).unwrap();
        assert!(g.cell(Point::new(1, 1)).is_some());
        assert!(g.cell(Point::new(3, 0)).is_none());
        assert!(g.cell(Point::new(0, -1)).is_none());
        assert_eq!(g.index_of(Point::new(2, 1)), Some(5));
        assert_eq!(g.point_of(5), Point::new(2, 1));
    }

    #[test]
    fn neighbor_order_is_deterministic() {
        let g = Grid::new(4).unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(
            buf,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn corner_has_three_neighbors() {
        let g = Grid::new(4).unwrap();
        let mut buf = Vec::new();
        g.neighbors(Point::ZERO, &mut buf);
        assert_eq!(
            buf,
            vec![Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn reset_preserves_topology() {
        let mut g = Grid::new(4).unwrap();
        g.set_state(Point::new(2, 2), CellState::Obstacle);
        g.set_state(Point::new(1, 0), CellState::Visited);
        g.set_state(Point::new(1, 1), CellState::OnPath);
        let i = g.index_of(Point::new(1, 0)).unwrap();
        g.cell_at_mut(i).g = 4.0;
        g.cell_at_mut(i).parent = Some(0);

        g.reset_search();
        assert_eq!(g.state(Point::new(2, 2)), Some(CellState::Obstacle));
        assert_eq!(g.state(Point::new(1, 0)), Some(CellState::Empty));
        assert_eq!(g.state(Point::new(1, 1)), Some(CellState::Empty));
        assert_eq!(g.state(Point::ZERO), Some(CellState::Start));
        assert!(g.cell_at(i).g.is_infinite());
        assert_eq!(g.cell_at(i).parent, None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use crate::{CellState, Point};

    #[test]
    fn point_and_state_round_trip() {
        let p = Point::new(3, 7);
        let json = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);

        let s = CellState::OnPath;
        let json = serde_json::to_string(&s).unwrap();
        let back: CellState = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
