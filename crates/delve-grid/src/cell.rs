use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GridError;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Cell {
    /// Void.
    #[default]
    Empty = 0,
    /// Solid or traversable terrain; the renderer places a tile here.
    Floor = 1,
}

impl Cell {
    /// Returns `true` for [`Cell::Floor`].
    #[inline]
    pub fn is_floor(self) -> bool {
        self == Cell::Floor
    }

    /// Maps a thresholded value to a cell: `true` is floor, `false` is empty.
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit { Cell::Floor } else { Cell::Empty }
    }

    /// Character used by the text preview.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Floor => '#',
        }
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell as u8
    }
}

impl TryFrom<u8> for Cell {
    type Error = GridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Floor),
            other => Err(GridError::InvalidCell(other)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
