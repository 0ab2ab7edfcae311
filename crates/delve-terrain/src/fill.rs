//! Independent per-cell random fill.

use delve_grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, check_dimensions, check_unit_interval};
use crate::{GenRng, Seed};

/// Parameters for [`random_fill`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillParams {
    /// Probability that a cell becomes floor, in `[0, 1]`.
    pub fill_percentage: f32,
    /// Keep the outer ring of the map solid.
    pub borders: bool,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            fill_percentage: 0.45,
            borders: true,
        }
    }
}

/// Fills each cell with floor with probability `fill_percentage`.
///
/// Cells are visited column by column (`x` outer, `y` inner), one
/// `next_float01()` per cell. Border cells under border preservation are set
/// to floor without consuming a draw.
pub fn random_fill(
    width: i32,
    height: i32,
    seed: Seed,
    params: &FillParams,
) -> Result<Grid, GenerationError> {
    check_dimensions(width, height)?;
    check_unit_interval("fill_percentage", params.fill_percentage)?;

    let mut grid = Grid::empty(width, height)?;
    let mut rng = GenRng::from_seed(seed);
    for x in 0..width {
        for y in 0..height {
            let cell = if params.borders && grid.is_border(x, y) {
                Cell::Floor
            } else {
                Cell::from_bit(rng.chance(params.fill_percentage))
            };
            grid.set(x, y, cell)?;
        }
    }
    Ok(grid)
}
