//! Side-view heightmap terrain: every column is floor from the bottom row up
//! to a per-column height.
//!
//! Two height sources are provided, noise and a random walk, each with a
//! smoothed variant that trades detail for longer, gentler slopes.

use delve_grid::Grid;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, check_dimensions};
use crate::{GenRng, NoiseSampler, Seed};

/// Parameters for [`smoothed_noise_terrain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothedNoiseParams {
    /// Distance in columns between noise samples. Heights in between are
    /// interpolated linearly. Values of 1 or less fall back to plain noise.
    pub interval: i32,
}

impl Default for SmoothedNoiseParams {
    fn default() -> Self {
        Self { interval: 2 }
    }
}

/// Parameters for [`smoothed_random_walk_terrain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothedWalkParams {
    /// Minimum number of columns the walk holds a height before it may
    /// change again. Must be positive.
    pub min_section_width: i32,
}

impl Default for SmoothedWalkParams {
    fn default() -> Self {
        Self {
            min_section_width: 2,
        }
    }
}

/// Noise heightmap.
///
/// Column `x` is filled up to
/// `floor((sample(x, seed) - 0.5) * (height - 1)) + (height - 1) / 2`.
/// Heights below zero leave the column empty.
pub fn noise_terrain<S>(
    width: i32,
    height: i32,
    seed: Seed,
    sampler: &S,
) -> Result<Grid, GenerationError>
where
    S: NoiseSampler + ?Sized,
{
    check_dimensions(width, height)?;
    let mut grid = Grid::empty(width, height)?;
    fill_noise_columns(&mut grid, seed, sampler)?;
    Ok(grid)
}

fn fill_noise_columns<S>(grid: &mut Grid, seed: Seed, sampler: &S) -> Result<(), GenerationError>
where
    S: NoiseSampler + ?Sized,
{
    let top = grid.height() - 1;
    for x in 0..grid.width() {
        let offset = (sampler.sample(x as f64, seed.value()) - 0.5) * top as f64;
        let column_height = offset.floor() as i32 + top / 2;
        grid.fill_column(x, column_height)?;
    }
    Ok(())
}

/// Noise heightmap sampled every `interval` columns with linear
/// interpolation in between.
///
/// Samples are taken at `x = 0, interval, 2 * interval, ...` until one lands
/// past the last column, which closes the final segment. Sampled
/// heights are `floor(sample(x, seed) * (height - 1))`.
pub fn smoothed_noise_terrain<S>(
    width: i32,
    height: i32,
    seed: Seed,
    params: &SmoothedNoiseParams,
    sampler: &S,
) -> Result<Grid, GenerationError>
where
    S: NoiseSampler + ?Sized,
{
    check_dimensions(width, height)?;
    let mut grid = Grid::empty(width, height)?;

    let interval = params.interval;
    if interval <= 1 {
        fill_noise_columns(&mut grid, seed, sampler)?;
        return Ok(grid);
    }

    let top = height - 1;
    // Sample positions can run past `i32::MAX` for large intervals.
    let interval = i64::from(interval);
    let end = i64::from(width);

    let mut samples = Vec::new();
    let mut x: i64 = 0;
    loop {
        let sampled = (sampler.sample(x as f64, seed.value()) * top as f64).floor() as i32;
        samples.push((x, sampled));
        if x >= end {
            break;
        }
        x += interval;
    }

    for segment in samples.windows(2) {
        let (start_x, start_h) = segment[0];
        let (end_x, end_h) = segment[1];
        let slope = (end_h - start_h) as f64 / interval as f64;

        let mut current = start_h as f64;
        for x in start_x..end_x.min(end) {
            // Bounded by `width`, so the column fits in an i32.
            grid.fill_column(x as i32, current.floor() as i32)?;
            current += slope;
        }
    }

    Ok(grid)
}

/// Random-walk heightmap.
///
/// Draw order: one `next_int(0, height - 1)` for the starting height, then
/// one `next_int(0, 3)` per column (0 = up, 1 = down, 2 = stay). Heights stay
/// within `[0, height - 1]`.
pub fn random_walk_terrain(width: i32, height: i32, seed: Seed) -> Result<Grid, GenerationError> {
    check_dimensions(width, height)?;
    let mut grid = Grid::empty(width, height)?;
    let mut rng = GenRng::from_seed(seed);

    let top = height - 1;
    let mut current = rng.next_int(0, top);
    for x in 0..width {
        current = step_height(current, rng.next_int(0, 3), top);
        grid.fill_column(x, current)?;
    }
    Ok(grid)
}

/// Random-walk heightmap that only changes height once a section of at
/// least `min_section_width` columns has been laid down.
///
/// Draw order: the starting height as in [`random_walk_terrain`], then one
/// `next_int(0, 3)` at each column where the current section has reached the
/// minimum width. The section counter starts at zero, so the first decision
/// is made at `x = min_section_width`.
pub fn smoothed_random_walk_terrain(
    width: i32,
    height: i32,
    seed: Seed,
    params: &SmoothedWalkParams,
) -> Result<Grid, GenerationError> {
    check_dimensions(width, height)?;
    if params.min_section_width <= 0 {
        return Err(GenerationError::invalid(
            "min_section_width",
            format!("{} must be positive", params.min_section_width),
        ));
    }

    let mut grid = Grid::empty(width, height)?;
    let mut rng = GenRng::from_seed(seed);

    let top = height - 1;
    let mut current = rng.next_int(0, top);
    let mut section_width = 0;
    for x in 0..width {
        if section_width >= params.min_section_width {
            current = step_height(current, rng.next_int(0, 3), top);
            section_width = 0;
        }
        section_width += 1;
        grid.fill_column(x, current)?;
    }
    Ok(grid)
}

/// Applies one walk decision, refusing to leave `[0, top]`.
fn step_height(current: i32, choice: i32, top: i32) -> i32 {
    match choice {
        0 if current < top => current + 1,
        1 if current > 0 => current - 1,
        _ => current,
    }
}
