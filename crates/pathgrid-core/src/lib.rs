//! **pathgrid-core** — grid arena and cell types for the pathgrid search
//! visualizer.
//!
//! This crate provides the data layer shared by the search engine and its
//! collaborators: the [`Point`] geometry primitive, the per-cell search
//! record ([`Cell`], [`CellState`]), the [`Grid`] arena, and the
//! [`CellUpdate`] change events consumed by rendering back-ends.
//!
//! The grid is produced fully formed by a generator (see `pathgrid-gen`)
//! and then owned and mutated exclusively by one search run at a time.

pub mod cell;
pub mod events;
pub mod geom;
pub mod grid;

pub use cell::{Cell, CellState};
pub use events::CellUpdate;
pub use geom::Point;
pub use grid::{Grid, GridError};
