//! Cellular-automaton smoothing.
//!
//! Each pass applies a majority rule to every cell: more than half the
//! neighborhood floor makes the cell floor, fewer than half makes it empty,
//! exactly half leaves it alone. Neighbor counts are always read from the
//! grid as it was when the pass started, so the result does not depend on
//! visiting order.

use delve_grid::{Cell, Grid, Neighborhood};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Parameters for [`smooth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonParams {
    /// Moore (threshold 4) or Von Neumann (threshold 2).
    pub neighborhood: Neighborhood,
    /// Number of full-grid passes.
    pub passes: u32,
    /// Force the outer ring to floor on every pass.
    pub borders: bool,
}

impl Default for AutomatonParams {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            passes: 3,
            borders: true,
        }
    }
}

/// Runs `params.passes` smoothing passes over `grid` in place.
///
/// Each pass computes the next state from a snapshot of the previous one and
/// swaps it in at the end of the pass.
pub fn smooth(grid: &mut Grid, params: &AutomatonParams) -> Result<(), GenerationError> {
    let threshold = params.neighborhood.majority_threshold();
    let mut next = grid.clone();

    for pass in 0..params.passes {
        let mut changed = 0_usize;
        for x in 0..grid.width() {
            for y in 0..grid.height() {
                let current = grid.get(x, y)?;
                let updated = if params.borders && grid.is_border(x, y) {
                    Cell::Floor
                } else {
                    let neighbors = grid.count_neighbors(x, y, params.neighborhood)?;
                    match neighbors.cmp(&threshold) {
                        std::cmp::Ordering::Greater => Cell::Floor,
                        std::cmp::Ordering::Less => Cell::Empty,
                        std::cmp::Ordering::Equal => current,
                    }
                };
                if updated != current {
                    changed += 1;
                }
                next.set(x, y, updated)?;
            }
        }
        std::mem::swap(grid, &mut next);
        tracing::trace!(pass, changed, "automaton pass");
    }
    Ok(())
}
