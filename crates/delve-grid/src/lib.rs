//! Fixed-size binary occupancy grids for 2D map generation.
//!
//! A [`Grid`] stores one [`Cell`] per coordinate, either [`Cell::Floor`] or
//! [`Cell::Empty`]. Generators own a grid exclusively while they mutate it and
//! hand it back to the caller when done; renderers only read it through
//! [`Grid::floor_cells`].

mod cell;
mod error;
mod grid;
mod neighborhood;

pub use cell::Cell;
pub use error::GridError;
pub use grid::Grid;
pub use neighborhood::Neighborhood;
