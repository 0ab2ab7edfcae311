//! Vertical tunnel carved through solid rock.

use delve_grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, check_dimensions, check_unit_interval};
use crate::{GenRng, Seed};

/// Parameters for [`directional_tunnel`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelParams {
    /// Smallest half-width the tunnel may shrink to. The carved span at a row
    /// is `2 * half_width + 1` cells.
    pub min_width: i32,
    /// Largest half-width the tunnel may grow to.
    pub max_width: i32,
    /// Largest change of the tunnel center in one row.
    pub max_drift: i32,
    /// Chance per row that the half-width is redrawn.
    pub roughness: f32,
    /// Chance per row that the center moves.
    pub drift: f32,
}

impl Default for TunnelParams {
    fn default() -> Self {
        Self {
            min_width: 1,
            max_width: 4,
            max_drift: 2,
            roughness: 0.75,
            drift: 0.75,
        }
    }
}

impl TunnelParams {
    fn validate(&self, width: i32) -> Result<(), GenerationError> {
        check_unit_interval("roughness", self.roughness)?;
        check_unit_interval("drift", self.drift)?;
        if self.min_width < 0 {
            return Err(GenerationError::invalid(
                "min_width",
                format!("{} is negative", self.min_width),
            ));
        }
        if self.max_width < 1 {
            return Err(GenerationError::invalid(
                "max_width",
                format!("{} is below the starting half-width of 1", self.max_width),
            ));
        }
        if self.min_width > self.max_width {
            return Err(GenerationError::invalid(
                "min_width",
                format!("{} exceeds max_width {}", self.min_width, self.max_width),
            ));
        }
        if self.max_drift < 0 {
            return Err(GenerationError::invalid(
                "max_drift",
                format!("{} is negative", self.max_drift),
            ));
        }
        let required = 2 * i64::from(self.max_width) + 3;
        if i64::from(width) < required {
            return Err(GenerationError::invalid(
                "max_width",
                format!(
                    "a tunnel of half-width {} needs a map at least {required} wide, got {width}",
                    self.max_width
                ),
            ));
        }
        Ok(())
    }
}

/// Carves one tunnel from the bottom row to the top row of an all-floor map.
///
/// The tunnel starts with half-width 1 centered on `width / 2`. After
/// clearing `[x - w, x + w]` on each row:
///
/// 1. `next_float01() < roughness` redraws the half-width to
///    `clamp(w + next_int(-max_width, max_width), min_width, max_width)`;
/// 2. `next_float01() < drift` moves the center to
///    `clamp(x + next_int(-max_drift, max_drift), max_width + 1, width - 2 - max_width)`.
///
/// The upper center bound is `width - 2 - max_width`, one less than the
/// symmetric `width - 1 - max_width`, so the tunnel never reaches column
/// `width - 1`. Both bounds use `max_width`, not the current half-width, so
/// no later widening can reach columns `0` or `width - 1`.
pub fn directional_tunnel(
    width: i32,
    height: i32,
    seed: Seed,
    params: &TunnelParams,
) -> Result<Grid, GenerationError> {
    check_dimensions(width, height)?;
    params.validate(width)?;

    let mut grid = Grid::full(width, height)?;
    let mut rng = GenRng::from_seed(seed);

    let min_center = params.max_width + 1;
    let max_center = width - 2 - params.max_width;

    let mut half_width = 1;
    let mut center = width / 2;

    for y in 0..height {
        for x in center - half_width..=center + half_width {
            grid.set(x, y, Cell::Empty)?;
        }

        if rng.chance(params.roughness) {
            let change = rng.next_int(-params.max_width, params.max_width);
            half_width = (half_width + change).clamp(params.min_width, params.max_width);
        }

        if rng.chance(params.drift) {
            let change = rng.next_int(-params.max_drift, params.max_drift);
            center = center.saturating_add(change).clamp(min_center, max_center);
        }
    }

    Ok(grid)
}
