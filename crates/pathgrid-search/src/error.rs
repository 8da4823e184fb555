//! Error types surfaced by a search run.

use std::fmt;

use pathgrid_core::Point;

/// Failures of a search run.
///
/// Configuration errors are surfaced by [`crate::Engine::start`] before
/// any cell is touched and are never retried. `BrokenParentChain` is the
/// only fatal mid-run condition: it means backtracking could not walk
/// from the destination to the start, which indicates a broken invariant
/// upstream. Exhaustion of the frontier is a normal terminal outcome, not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start cell is marked as an obstacle.
    StartIsObstacle(Point),
    /// The destination cell is marked as an obstacle.
    DestinationIsObstacle(Point),
    /// `step` was called on an engine that was never started.
    NotStarted,
    /// Backtracking failed to reach the start cell.
    BrokenParentChain {
        /// Where the parent chain ended or the step bound was exceeded.
        at: Point,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::StartIsObstacle(p) => {
                write!(f, "start cell {p} is marked as an obstacle")
            }
            SearchError::DestinationIsObstacle(p) => {
                write!(f, "destination cell {p} is marked as an obstacle")
            }
            SearchError::NotStarted => write!(f, "step called before start"),
            SearchError::BrokenParentChain { at } => {
                write!(f, "parent chain broke at {at} before reaching the start")
            }
        }
    }
}

impl std::error::Error for SearchError {}
