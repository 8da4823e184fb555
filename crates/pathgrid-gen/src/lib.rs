//! **pathgrid-gen** — obstacle layout generation.
//!
//! Produces the static grid the search engine consumes: random seed
//! points extended into wall segments of fixed length with a shallow
//! diagonal drift. The output contract is one start, one destination and
//! zero or more in-bounds obstacles; the search core assumes it without
//! re-validating beyond bounds checks.

use pathgrid_core::{CellState, Grid, GridError, Point};
use rand::{Rng, RngExt};

/// Number of wall segments for a grid of the given size, minimum 3.
fn default_segments(size: i32) -> usize {
    (size / 4).max(3) as usize
}

/// Generate a `size`×`size` grid with the default number of wall
/// segments.
pub fn generate(size: i32, rng: &mut impl Rng) -> Result<Grid, GridError> {
    let segments = default_segments(size);
    generate_with(size, segments, rng)
}

/// Generate a grid with an explicit number of wall segments.
///
/// Each segment grows from a random seed point: x advances by one per
/// step for `size / 4` steps while y drifts by a per-segment random
/// Δ ∈ {-1, 0, 1}. When the segment drifts diagonally the laterally
/// adjacent cell is filled as well, so diagonal walls have no gaps an
/// 8-directional search could slip through. Cells outside the grid and
/// the start/destination cells are left untouched.
pub fn generate_with(size: i32, segments: usize, rng: &mut impl Rng) -> Result<Grid, GridError> {
    let mut grid = Grid::new(size)?;
    let length = size / 4;

    for _ in 0..segments {
        let mut x = rng.random_range(0..size);
        let mut y = rng.random_range(0..size);
        let dy = rng.random_range(-1..2);

        for _ in 0..length {
            x += 1;
            y += dy;
            if dy != 0 {
                place(&mut grid, Point::new(x, y - dy));
            }
            place(&mut grid, Point::new(x, y));
        }
    }

    Ok(grid)
}

fn place(grid: &mut Grid, p: Point) {
    if p == grid.start() || p == grid.destination() {
        return;
    }
    // set_state already no-ops out of bounds.
    grid.set_state(p, CellState::Obstacle);
}
