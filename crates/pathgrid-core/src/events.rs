//! Change events emitted towards the rendering collaborator.

use crate::cell::{Cell, CellState};
use crate::geom::Point;

/// Snapshot of a cell whose state or costs changed during a search step.
///
/// The engine mutates plain cell data and then emits one of these per
/// changed cell; the renderer only ever sees snapshots and never touches
/// search state. `f` is included precomputed so renderers need no cost
/// model of their own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellUpdate {
    pub pos: Point,
    pub state: CellState,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

impl CellUpdate {
    /// Snapshot the current fields of `cell` at `pos`.
    pub fn snapshot(pos: Point, cell: &Cell) -> Self {
        Self {
            pos,
            state: cell.state,
            g: cell.g,
            h: cell.h,
            f: cell.f(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_computed_f() {
        let mut cell = Cell::with_state(CellState::Visited);
        cell.g = 2.0;
        cell.h = 1.5;
        let u = CellUpdate::snapshot(Point::new(1, 2), &cell);
        assert_eq!(u.pos, Point::new(1, 2));
        assert_eq!(u.state, CellState::Visited);
        assert_eq!(u.f, 3.5);
    }
}
