//! Adjacency rules used for neighbor counting and smoothing.

use serde::{Deserialize, Serialize};

/// Which cells count as neighbors of a given cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Neighborhood {
    /// 8-connected: orthogonal and diagonal neighbors.
    #[default]
    Moore,
    /// 4-connected: up, down, left and right only.
    VonNeumann,
}

const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const VON_NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

impl Neighborhood {
    /// Returns `true` if diagonal cells are part of the neighborhood.
    pub fn includes_diagonals(self) -> bool {
        matches!(self, Neighborhood::Moore)
    }

    /// Offsets of every neighbor relative to the center cell.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::Moore => &MOORE_OFFSETS,
            Neighborhood::VonNeumann => &VON_NEUMANN_OFFSETS,
        }
    }

    /// Majority threshold for the smoothing rule: half the neighborhood size.
    pub fn majority_threshold(self) -> u32 {
        self.offsets().len() as u32 / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Neighborhood::Moore.majority_threshold(), 4);
        assert_eq!(Neighborhood::VonNeumann.majority_threshold(), 2);
    }

    #[test]
    fn test_offsets_exclude_center() {
        for nb in [Neighborhood::Moore, Neighborhood::VonNeumann] {
            assert!(!nb.offsets().contains(&(0, 0)));
        }
    }

    #[test]
    fn test_von_neumann_has_no_diagonals() {
        assert!(!Neighborhood::VonNeumann.includes_diagonals());
        assert!(
            Neighborhood::VonNeumann
                .offsets()
                .iter()
                .all(|&(dx, dy)| dx == 0 || dy == 0)
        );
    }
}
