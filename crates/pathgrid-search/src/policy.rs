//! Cost model configuration: step costs and heuristics.

use pathgrid_core::Point;

/// Default heuristic weight for [`CostPolicy::WeightedOctile`].
pub const DEFAULT_OCTILE_WEIGHT: f64 = 2.5;

/// The cost model applied by the engine.
///
/// `f = g + h` everywhere; the policy decides how `g` accumulates per
/// move and how `h` estimates the remaining distance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostPolicy {
    /// Uniform step cost 1 with the Chebyshev heuristic
    /// `max(|dx|, |dy|)`. Admissible for 8-directional movement, so
    /// returned paths are shortest.
    Chebyshev,
    /// Octile step costs (1 axis-aligned, √2 diagonal) with heuristic
    /// `weight × octile(p, dest)`. Inadmissible for `weight > 1`:
    /// greedier, faster, not guaranteed shortest. The weight is kept as
    /// configuration rather than corrected; optimality only holds at
    /// `weight = 1.0`.
    WeightedOctile { weight: f64 },
}

impl Default for CostPolicy {
    fn default() -> Self {
        CostPolicy::Chebyshev
    }
}

impl CostPolicy {
    /// The weighted octile policy with its default weight.
    pub const fn weighted_octile() -> Self {
        CostPolicy::WeightedOctile {
            weight: DEFAULT_OCTILE_WEIGHT,
        }
    }

    /// Cost of one move between 8-adjacent cells.
    pub fn step_cost(self, from: Point, to: Point) -> f64 {
        debug_assert!(from.adjacent_8(to));
        match self {
            CostPolicy::Chebyshev => 1.0,
            CostPolicy::WeightedOctile { .. } => {
                if from.x != to.x && from.y != to.y {
                    std::f64::consts::SQRT_2
                } else {
                    1.0
                }
            }
        }
    }

    /// Heuristic estimate of the remaining cost from `p` to `dest`.
    pub fn heuristic(self, p: Point, dest: Point) -> f64 {
        let dx = (p.x - dest.x).abs() as f64;
        let dy = (p.y - dest.y).abs() as f64;
        match self {
            CostPolicy::Chebyshev => dx.max(dy),
            CostPolicy::WeightedOctile { weight } => {
                let octile = dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy);
                weight * octile
            }
        }
    }
}

/// What to do when a neighbor's candidate cost arrives while the neighbor
/// is already in the frontier.
///
/// The system this reimplements changed behaviour between iterations;
/// both variants are kept selectable. `Relax` is the default and matches
/// standard A* semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelaxPolicy {
    /// Update `g` and `parent` whenever the candidate cost is strictly
    /// better.
    #[default]
    Relax,
    /// Historical variant: the first cost recorded for a frontier cell
    /// wins and later candidates are ignored. Kept only for
    /// compatibility testing; it can return non-shortest paths even
    /// under an admissible heuristic.
    FirstWins,
}
