//! Rectangular cell storage with bounds-checked access.
//!
//! Cells are stored row by row with `x` varying fastest. `y = 0` is the
//! bottom row; heightmap generators fill columns upward from it.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::{Cell, GridError, Neighborhood};

/// A `width x height` grid of [`Cell`]s.
///
/// The size is fixed at construction. Every accessor that takes a coordinate
/// returns [`GridError::OutOfBounds`] instead of panicking or clamping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid", into = "RawGrid")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimension`] if either dimension is not
    /// positive.
    pub fn new(width: i32, height: i32, fill: Cell) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        })
    }

    /// Creates an all-[`Cell::Empty`] grid.
    pub fn empty(width: i32, height: i32) -> Result<Self, GridError> {
        Self::new(width, height, Cell::Empty)
    }

    /// Creates an all-[`Cell::Floor`] grid.
    pub fn full(width: i32, height: i32) -> Result<Self, GridError> {
        Self::new(width, height, Cell::Floor)
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a grid has at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `(x, y)` lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Returns `true` if `(x, y)` lies on the outermost ring of the grid.
    #[inline]
    pub fn is_border(&self, x: i32, y: i32) -> bool {
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Returns the cell at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Sets the cell at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), GridError> {
        let index = self.index(x, y)?;
        self.cells[index] = cell;
        Ok(())
    }

    /// Overwrites every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Fills column `x` with floor from `y = 0` up to and including `top`.
    ///
    /// A negative `top` leaves the column untouched; a `top` at or above the
    /// grid height is capped at the top row.
    pub fn fill_column(&mut self, x: i32, top: i32) -> Result<(), GridError> {
        let top = top.min(self.height - 1);
        for y in 0..=top {
            self.set(x, y, Cell::Floor)?;
        }
        Ok(())
    }

    /// Height of the highest floor cell in column `x`, or `None` if the
    /// column has no floor.
    pub fn column_height(&self, x: i32) -> Result<Option<i32>, GridError> {
        for y in (0..self.height).rev() {
            if self.get(x, y)?.is_floor() {
                return Ok(Some(y));
            }
        }
        Ok(None)
    }

    /// Counts floor cells around `(x, y)`, excluding the cell itself.
    ///
    /// Neighbors outside the grid are skipped rather than treated as empty
    /// or floor, so a corner cell has at most 3 Moore neighbors.
    pub fn count_neighbors(
        &self,
        x: i32,
        y: i32,
        neighborhood: Neighborhood,
    ) -> Result<u32, GridError> {
        // Validate the center so misuse is reported instead of silently
        // returning a partial count.
        self.index(x, y)?;

        let mut count = 0;
        for &(dx, dy) in neighborhood.offsets() {
            let (nx, ny) = (x + dx, y + dy);
            if self.contains(nx, ny) && self.get(nx, ny)?.is_floor() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Number of cells equal to `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterates over every cell as `(x, y, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i % width) as i32, (i / width) as i32, cell))
    }

    /// Iterates over the coordinates of every floor cell.
    ///
    /// This is the read contract for renderers: place one tile per yielded
    /// coordinate. No particular order is promised.
    pub fn floor_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells()
            .filter(|&(_, _, cell)| cell.is_floor())
            .map(|(x, y, _)| (x, y))
    }

    /// Raw cell slice in row-major order (`x` fastest).
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Hash of the dimensions and every cell, for determinism comparisons.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        for cell in &self.cells {
            u8::from(*cell).hash(&mut hasher);
        }
        hasher.finish()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize + y as usize * self.width as usize)
    }
}

impl fmt::Display for Grid {
    /// Renders the top row first so the preview reads like the map.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height).rev() {
            let start = y as usize * self.width as usize;
            let row = &self.cells[start..start + self.width as usize];
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized form of [`Grid`]; validated on the way back in.
#[derive(Serialize, Deserialize)]
struct RawGrid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl From<Grid> for RawGrid {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let grid = Grid::empty(raw.width, raw.height)?;
        if raw.cells.len() != grid.len() {
            return Err(GridError::CellCountMismatch {
                expected: grid.len(),
                actual: raw.cells.len(),
            });
        }
        Ok(Self {
            cells: raw.cells,
            ..grid
        })
    }
}
