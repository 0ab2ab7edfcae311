/// Errors raised by grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height is zero or negative.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// A coordinate fell outside `[0, width) x [0, height)`.
    ///
    /// Generators never produce this for valid input; seeing it means a
    /// generator has a bug.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column that was accessed.
        x: i32,
        /// Row that was accessed.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// A raw value other than 0 or 1 was decoded as a cell.
    #[error("invalid cell value: {0}")]
    InvalidCell(u8),

    /// Serialized cell data does not match the declared dimensions.
    #[error("expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Number of cells present.
        actual: usize,
    },
}
