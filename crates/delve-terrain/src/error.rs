use delve_grid::GridError;

/// Errors returned by generators and the smoother.
///
/// Parameters are validated before any cell is written, so an error never
/// comes with a partially generated grid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// Invalid dimensions, or an out-of-bounds access inside a generator.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A generation parameter is outside its allowed range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The random-walk cave carver hit its step cap before removing enough
    /// cells.
    #[error("random walk stopped after {limit} steps with {removed}/{target} cells removed")]
    StepLimitExceeded {
        /// Step cap that was reached.
        limit: u64,
        /// Cells removed when the cap tripped.
        removed: usize,
        /// Cells the walk was asked to remove.
        target: usize,
    },
}

impl GenerationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that a probability or fraction lies in `[0, 1]`.
pub(crate) fn check_unit_interval(name: &'static str, value: f32) -> Result<(), GenerationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GenerationError::invalid(
            name,
            format!("{value} is outside [0, 1]"),
        ))
    }
}

/// Checks map dimensions up front so generators fail before allocating.
pub(crate) fn check_dimensions(width: i32, height: i32) -> Result<(), GenerationError> {
    if width <= 0 || height <= 0 {
        return Err(GridError::InvalidDimension { width, height }.into());
    }
    Ok(())
}
