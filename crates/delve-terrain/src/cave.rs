//! Top-down cave maps.
//!
//! [`noise_cave`] thresholds a noise field cell by cell. [`random_walk_cave`]
//! starts from solid rock and lets a walker clear floor until a target
//! fraction of the interior has been removed.

use delve_grid::{Cell, Grid};
use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, check_dimensions, check_unit_interval};
use crate::{GenRng, NoiseSampler, Seed};

/// Parameters for [`noise_cave`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseCaveParams {
    /// Scale applied to cell coordinates before sampling. Smaller values
    /// give larger caverns.
    pub modifier: f64,
    /// Horizontal offset into the noise field.
    pub offset_x: f64,
    /// Vertical offset into the noise field.
    pub offset_y: f64,
    /// Keep the outer ring of the map solid.
    pub borders: bool,
}

impl Default for NoiseCaveParams {
    fn default() -> Self {
        Self {
            modifier: 0.1,
            offset_x: 0.0,
            offset_y: 0.0,
            borders: true,
        }
    }
}

/// Parameters for [`random_walk_cave`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkCaveParams {
    /// Fraction of the walkable interior to clear, in `[0, 1]`.
    pub removal_fraction: f32,
    /// Keep the outer ring of the map solid. The walker is confined to the
    /// interior one cell in from each edge.
    pub borders: bool,
    /// Allow diagonal steps.
    pub diagonal: bool,
    /// Maximum number of walker steps before giving up. `None` derives a cap
    /// from the interior area.
    pub step_limit: Option<u64>,
}

impl Default for WalkCaveParams {
    fn default() -> Self {
        Self {
            removal_fraction: 0.25,
            borders: true,
            diagonal: false,
            step_limit: None,
        }
    }
}

/// Step offsets for orthogonal movement, indexed by the direction draw.
const ORTHOGONAL_STEPS: [IVec2; 4] = [IVec2::Y, IVec2::NEG_Y, IVec2::NEG_X, IVec2::X];

/// Thresholded-noise cave.
///
/// Border cells (when enabled) are floor. Every other cell is
/// `round(sample(x * modifier + offset_x + seed, y * modifier + offset_y + seed))`,
/// rounding half to even so an exact 0.5 is empty.
pub fn noise_cave<S>(
    width: i32,
    height: i32,
    seed: Seed,
    params: &NoiseCaveParams,
    sampler: &S,
) -> Result<Grid, GenerationError>
where
    S: NoiseSampler + ?Sized,
{
    check_dimensions(width, height)?;
    for (name, value) in [
        ("modifier", params.modifier),
        ("offset_x", params.offset_x),
        ("offset_y", params.offset_y),
    ] {
        if !value.is_finite() {
            return Err(GenerationError::invalid(name, format!("{value} is not finite")));
        }
    }

    let mut grid = Grid::empty(width, height)?;
    for x in 0..width {
        for y in 0..height {
            let cell = if params.borders && grid.is_border(x, y) {
                Cell::Floor
            } else {
                let nx = x as f64 * params.modifier + params.offset_x + seed.value();
                let ny = y as f64 * params.modifier + params.offset_y + seed.value();
                Cell::from_bit(sampler.sample(nx, ny).round_ties_even() >= 1.0)
            };
            grid.set(x, y, cell)?;
        }
    }
    Ok(grid)
}

/// Inclusive rectangle the walker may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Interior {
    min: IVec2,
    max: IVec2,
}

impl Interior {
    fn for_grid(width: i32, height: i32, borders: bool) -> Self {
        let inset = i32::from(borders);
        Self {
            min: IVec2::splat(inset),
            max: IVec2::new(width - 1 - inset, height - 1 - inset),
        }
    }

    fn area(&self) -> usize {
        let size = self.max - self.min + IVec2::ONE;
        size.x as usize * size.y as usize
    }

    fn clamp(&self, position: IVec2) -> IVec2 {
        position.clamp(self.min, self.max)
    }
}

/// Cap used when [`WalkCaveParams::step_limit`] is `None`.
pub fn default_step_limit(interior_area: usize) -> u64 {
    (interior_area as u64).saturating_mul(10_000).max(1_000_000)
}

/// Random-walk cave.
///
/// The map starts as solid floor. A walker starts at a random interior cell
/// and, at each step, clears its cell if it is still floor, then moves and is
/// clamped back into the interior. The walk ends once exactly
/// `floor(interior_area * removal_fraction)` distinct cells are cleared.
///
/// Draw order: start `x = next_int(min_x, max_x)`, `y = next_int(min_y, max_y)`;
/// per step either `dx = next_int(-1, 2)` then `dy = next_int(-1, 2)` with
/// diagonal movement, or one `next_int(0, 4)` picking up, down, left, right.
///
/// The walk has no theoretical step bound, so a cap is enforced and reported
/// as [`GenerationError::StepLimitExceeded`].
pub fn random_walk_cave(
    width: i32,
    height: i32,
    seed: Seed,
    params: &WalkCaveParams,
) -> Result<Grid, GenerationError> {
    check_dimensions(width, height)?;
    check_unit_interval("removal_fraction", params.removal_fraction)?;
    if params.borders && (width < 3 || height < 3) {
        return Err(GenerationError::invalid(
            "borders",
            format!("a {width}x{height} map has no interior inside its border"),
        ));
    }

    let interior = Interior::for_grid(width, height, params.borders);
    let area = interior.area();
    let target = (area as f64 * params.removal_fraction as f64).floor() as usize;
    let limit = params.step_limit.unwrap_or_else(|| default_step_limit(area));

    let mut grid = Grid::full(width, height)?;
    let mut rng = GenRng::from_seed(seed);

    let mut position = IVec2::new(
        rng.next_int(interior.min.x, interior.max.x),
        rng.next_int(interior.min.y, interior.max.y),
    );

    let mut removed = 0;
    let mut steps = 0_u64;
    while removed < target {
        if steps >= limit {
            tracing::warn!(limit, removed, target, "random walk cave hit its step cap");
            return Err(GenerationError::StepLimitExceeded {
                limit,
                removed,
                target,
            });
        }
        steps += 1;

        if grid.get(position.x, position.y)?.is_floor() {
            grid.set(position.x, position.y, Cell::Empty)?;
            removed += 1;
        }

        let step = if params.diagonal {
            let dx = rng.next_int(-1, 2);
            let dy = rng.next_int(-1, 2);
            IVec2::new(dx, dy)
        } else {
            ORTHOGONAL_STEPS[rng.next_int(0, 4) as usize]
        };
        position = interior.clamp(position + step);
    }

    tracing::trace!(steps, removed, "random walk cave finished");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueNoise;

    fn assert_border_floor(grid: &Grid) {
        for (x, y, cell) in grid.cells() {
            if grid.is_border(x, y) {
                assert_eq!(cell, Cell::Floor, "border cell ({x}, {y}) was cleared");
            }
        }
    }

    #[test]
    fn test_noise_cave_borders_preserved() {
        let params = NoiseCaveParams::default();
        let grid = noise_cave(40, 25, Seed(88.0), &params, &ValueNoise::new()).unwrap();
        assert_border_floor(&grid);
        assert_eq!(grid.len(), 40 * 25);
    }

    #[test]
    fn test_noise_cave_rounds_half_to_even() {
        let params = NoiseCaveParams {
            borders: false,
            ..Default::default()
        };
        for (value, expected) in [(0.5, 0), (0.49, 0), (0.51, 16), (1.0, 16), (0.0, 0)] {
            let sampler = move |_x: f64, _y: f64| value;
            let grid = noise_cave(4, 4, Seed(0.0), &params, &sampler).unwrap();
            assert_eq!(grid.count(Cell::Floor), expected, "sample {value}");
        }
    }

    #[test]
    fn test_noise_cave_sampling_coordinates() {
        let params = NoiseCaveParams {
            modifier: 2.0,
            offset_x: 1.0,
            offset_y: 0.0,
            borders: false,
        };
        // x' = 2x + 1 + 3 > 8 only for x >= 3
        let sampler = |x: f64, _y: f64| if x > 8.0 { 1.0 } else { 0.0 };
        let grid = noise_cave(5, 2, Seed(3.0), &params, &sampler).unwrap();
        for (x, y, cell) in grid.cells() {
            assert_eq!(cell, Cell::from_bit(x >= 3), "cell ({x}, {y})");
        }
    }

    #[test]
    fn test_noise_cave_deterministic() {
        let params = NoiseCaveParams::default();
        let sampler = ValueNoise::new();
        let a = noise_cave(50, 30, Seed(5.0), &params, &sampler).unwrap();
        let b = noise_cave(50, 30, Seed(5.0), &params, &sampler).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_cave_rejects_non_finite() {
        let params = NoiseCaveParams {
            modifier: f64::NAN,
            ..Default::default()
        };
        let err = noise_cave(5, 5, Seed(0.0), &params, &ValueNoise::new()).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidParameter {
                name: "modifier",
                ..
            }
        ));
    }

    #[test]
    fn test_walk_cave_removes_exact_count() {
        for (borders, diagonal) in [(true, false), (true, true), (false, false), (false, true)] {
            for seed in [0.0, 1.0, 123.456] {
                let params = WalkCaveParams {
                    removal_fraction: 0.3,
                    borders,
                    diagonal,
                    step_limit: None,
                };
                let grid = random_walk_cave(30, 20, Seed(seed), &params).unwrap();
                let area = if borders { 28 * 18 } else { 30 * 20 };
                let expected = (area as f64 * 0.3_f32 as f64).floor() as usize;
                assert_eq!(
                    grid.count(Cell::Empty),
                    expected,
                    "borders={borders} diagonal={diagonal} seed={seed}"
                );
                if borders {
                    assert_border_floor(&grid);
                }
            }
        }
    }

    #[test]
    fn test_walk_cave_fraction_extremes() {
        let none = WalkCaveParams {
            removal_fraction: 0.0,
            ..Default::default()
        };
        let grid = random_walk_cave(12, 12, Seed(2.0), &none).unwrap();
        assert_eq!(grid.count(Cell::Floor), 144);

        let all = WalkCaveParams {
            removal_fraction: 1.0,
            ..Default::default()
        };
        let grid = random_walk_cave(12, 12, Seed(2.0), &all).unwrap();
        assert_eq!(grid.count(Cell::Empty), 100);
        assert_border_floor(&grid);
    }

    #[test]
    fn test_walk_cave_minimal_interior() {
        let params = WalkCaveParams {
            removal_fraction: 1.0,
            ..Default::default()
        };
        let grid = random_walk_cave(3, 3, Seed(0.0), &params).unwrap();
        assert_eq!(grid.get(1, 1).unwrap(), Cell::Empty);
        assert_eq!(grid.count(Cell::Floor), 8);
    }

    #[test]
    fn test_walk_cave_deterministic() {
        let params = WalkCaveParams {
            diagonal: true,
            ..Default::default()
        };
        let a = random_walk_cave(60, 34, Seed(404.0), &params).unwrap();
        let b = random_walk_cave(60, 34, Seed(404.0), &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_walk_cave_rejects_bad_parameters() {
        for removal_fraction in [-0.1, 1.5, f32::NAN] {
            let params = WalkCaveParams {
                removal_fraction,
                ..Default::default()
            };
            assert!(matches!(
                random_walk_cave(10, 10, Seed(0.0), &params),
                Err(GenerationError::InvalidParameter {
                    name: "removal_fraction",
                    ..
                })
            ));
        }

        let params = WalkCaveParams::default();
        assert!(matches!(
            random_walk_cave(2, 10, Seed(0.0), &params),
            Err(GenerationError::InvalidParameter {
                name: "borders",
                ..
            })
        ));
    }

    #[test]
    fn test_walk_cave_step_limit() {
        let params = WalkCaveParams {
            removal_fraction: 1.0,
            step_limit: Some(10),
            ..Default::default()
        };
        match random_walk_cave(40, 40, Seed(1.0), &params) {
            Err(GenerationError::StepLimitExceeded {
                limit,
                removed,
                target,
            }) => {
                assert_eq!(limit, 10);
                assert_eq!(target, 38 * 38);
                assert!((1..=10).contains(&removed), "removed {removed}");
            }
            other => panic!("expected step limit error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_step_limit_scales_with_area() {
        assert_eq!(default_step_limit(1), 1_000_000);
        assert_eq!(default_step_limit(1_000), 10_000_000);
    }

    #[test]
    fn test_interior_bounds() {
        let interior = Interior::for_grid(10, 6, true);
        assert_eq!(interior.min, IVec2::new(1, 1));
        assert_eq!(interior.max, IVec2::new(8, 4));
        assert_eq!(interior.area(), 32);
        assert_eq!(interior.clamp(IVec2::new(0, 9)), IVec2::new(1, 4));

        let open = Interior::for_grid(10, 6, false);
        assert_eq!(open.area(), 60);
    }
}
