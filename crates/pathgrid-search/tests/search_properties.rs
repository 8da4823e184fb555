//! Randomized invariant checks for the search engine.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pathgrid_core::{CellState, Grid, Point};
use pathgrid_search::{CostPolicy, Engine, Outcome, StepEvent};

const SIZE: i32 = 8;

fn grid_from(obstacles: &[(i32, i32)]) -> Grid {
    let mut grid = Grid::new(SIZE).unwrap();
    for &(x, y) in obstacles {
        let p = Point::new(x, y);
        if p != grid.start() && p != grid.destination() {
            grid.set_state(p, CellState::Obstacle);
        }
    }
    grid
}

fn obstacle_layout() -> impl Strategy<Value = Vec<(i32, i32)>> {
    proptest::collection::vec((0..SIZE, 0..SIZE), 0..24)
}

proptest! {
    /// Any successful run yields a connected chain of 8-adjacent,
    /// non-obstacle cells from start to destination.
    #[test]
    fn successful_paths_are_valid_chains(obstacles in obstacle_layout()) {
        let grid = grid_from(&obstacles);
        let mut engine = Engine::new(grid, CostPolicy::Chebyshev);
        if let Outcome::Succeeded(path) = engine.run().unwrap() {
            prop_assert_eq!(path.first(), Some(&engine.grid().start()));
            prop_assert_eq!(path.last(), Some(&engine.grid().destination()));
            for w in path.windows(2) {
                prop_assert!(w[0].adjacent_8(w[1]));
            }
            for &p in &path {
                prop_assert_ne!(engine.grid().state(p), Some(CellState::Obstacle));
            }
        }
    }

    /// Expanded cells never re-enter the frontier, whatever the layout.
    #[test]
    fn closed_set_exclusion_holds(obstacles in obstacle_layout()) {
        let grid = grid_from(&obstacles);
        let mut engine = Engine::new(grid, CostPolicy::Chebyshev);
        engine.start().unwrap();
        loop {
            let ev = engine.step().unwrap();
            for y in 0..SIZE {
                for x in 0..SIZE {
                    let p = Point::new(x, y);
                    if engine.visited_contains(p) {
                        prop_assert!(!engine.frontier_contains(p));
                    }
                }
            }
            if matches!(ev, StepEvent::Finished(_)) {
                break;
            }
        }
    }

    /// Identical reruns on an unmodified grid return identical results.
    #[test]
    fn reruns_are_deterministic(obstacles in obstacle_layout()) {
        let grid = grid_from(&obstacles);
        let mut engine = Engine::new(grid, CostPolicy::weighted_octile());
        let first = engine.run().unwrap();
        let second = engine.run().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Generated layouts always drive the engine to a terminal state.
    #[test]
    fn generated_grids_terminate(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = pathgrid_gen::generate(12, &mut rng).unwrap();
        let mut engine = Engine::new(grid, CostPolicy::Chebyshev);
        match engine.run().unwrap() {
            Outcome::Succeeded(path) => prop_assert!(path.len() >= 2),
            Outcome::Exhausted => prop_assert_eq!(engine.frontier_len(), 0),
        }
    }

    /// Octile runs only ever take unit or √2 steps.
    #[test]
    fn octile_step_costs_are_well_formed(obstacles in obstacle_layout()) {
        let grid = grid_from(&obstacles);
        let policy = CostPolicy::weighted_octile();
        let mut engine = Engine::new(grid, policy);
        if let Outcome::Succeeded(path) = engine.run().unwrap() {
            for w in path.windows(2) {
                let c = policy.step_cost(w[0], w[1]);
                prop_assert!(c == 1.0 || c == std::f64::consts::SQRT_2);
            }
        }
    }
}
