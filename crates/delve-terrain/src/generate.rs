//! Single entry point that maps an [`Algorithm`] to its generator.
//!
//! The dispatch owns each family's starting grid: heightmaps and noise caves
//! start empty, the random-walk cave and the tunnel start solid, and the
//! automaton families start from a random fill.

use std::fmt;
use std::str::FromStr;

use delve_grid::{Grid, Neighborhood};
use serde::{Deserialize, Serialize};

use crate::{
    AutomatonParams, FillParams, GenerationError, NoiseCaveParams, NoiseSampler, Seed,
    SmoothedNoiseParams, SmoothedWalkParams, TunnelParams, ValueNoise, WalkCaveParams,
    directional_tunnel, noise_cave, noise_terrain, random_fill, random_walk_cave,
    random_walk_terrain, smooth, smoothed_noise_terrain, smoothed_random_walk_terrain,
};

/// A generation algorithm together with its parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    /// Noise heightmap.
    #[default]
    Noise,
    /// Noise heightmap with interpolation between sparse samples.
    SmoothedNoise(SmoothedNoiseParams),
    /// Random-walk heightmap.
    RandomWalk,
    /// Random-walk heightmap with minimum plateau width.
    SmoothedRandomWalk(SmoothedWalkParams),
    /// Thresholded noise cave.
    NoiseCave(NoiseCaveParams),
    /// Cave carved by a random walker.
    RandomWalkCave(WalkCaveParams),
    /// Single vertical tunnel.
    Tunnel(TunnelParams),
    /// Independent random fill.
    RandomFill(FillParams),
    /// Random fill followed by cellular-automaton smoothing.
    CellularAutomaton {
        /// Initial fill.
        fill: FillParams,
        /// Smoothing passes.
        automaton: AutomatonParams,
    },
}

impl Algorithm {
    /// The family this algorithm belongs to.
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Noise => AlgorithmKind::Noise,
            Algorithm::SmoothedNoise(_) => AlgorithmKind::SmoothedNoise,
            Algorithm::RandomWalk => AlgorithmKind::RandomWalk,
            Algorithm::SmoothedRandomWalk(_) => AlgorithmKind::SmoothedRandomWalk,
            Algorithm::NoiseCave(_) => AlgorithmKind::NoiseCave,
            Algorithm::RandomWalkCave(_) => AlgorithmKind::RandomWalkCave,
            Algorithm::Tunnel(_) => AlgorithmKind::Tunnel,
            Algorithm::RandomFill(_) => AlgorithmKind::RandomFill,
            Algorithm::CellularAutomaton { automaton, .. } => match automaton.neighborhood {
                Neighborhood::Moore => AlgorithmKind::MooreAutomaton,
                Neighborhood::VonNeumann => AlgorithmKind::VonNeumannAutomaton,
            },
        }
    }
}

/// Algorithm family without parameters, used for selection by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    Noise,
    SmoothedNoise,
    RandomWalk,
    SmoothedRandomWalk,
    NoiseCave,
    RandomWalkCave,
    Tunnel,
    RandomFill,
    MooreAutomaton,
    VonNeumannAutomaton,
}

impl AlgorithmKind {
    /// Every family, in menu order.
    pub const ALL: [AlgorithmKind; 10] = [
        AlgorithmKind::Noise,
        AlgorithmKind::SmoothedNoise,
        AlgorithmKind::RandomWalk,
        AlgorithmKind::SmoothedRandomWalk,
        AlgorithmKind::NoiseCave,
        AlgorithmKind::RandomWalkCave,
        AlgorithmKind::Tunnel,
        AlgorithmKind::RandomFill,
        AlgorithmKind::MooreAutomaton,
        AlgorithmKind::VonNeumannAutomaton,
    ];

    /// Kebab-case name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::Noise => "noise",
            AlgorithmKind::SmoothedNoise => "smoothed-noise",
            AlgorithmKind::RandomWalk => "random-walk",
            AlgorithmKind::SmoothedRandomWalk => "smoothed-random-walk",
            AlgorithmKind::NoiseCave => "noise-cave",
            AlgorithmKind::RandomWalkCave => "random-walk-cave",
            AlgorithmKind::Tunnel => "tunnel",
            AlgorithmKind::RandomFill => "random-fill",
            AlgorithmKind::MooreAutomaton => "moore-automaton",
            AlgorithmKind::VonNeumannAutomaton => "von-neumann-automaton",
        }
    }

    /// The family with default parameters.
    pub fn default_algorithm(self) -> Algorithm {
        match self {
            AlgorithmKind::Noise => Algorithm::Noise,
            AlgorithmKind::SmoothedNoise => Algorithm::SmoothedNoise(Default::default()),
            AlgorithmKind::RandomWalk => Algorithm::RandomWalk,
            AlgorithmKind::SmoothedRandomWalk => Algorithm::SmoothedRandomWalk(Default::default()),
            AlgorithmKind::NoiseCave => Algorithm::NoiseCave(Default::default()),
            AlgorithmKind::RandomWalkCave => Algorithm::RandomWalkCave(Default::default()),
            AlgorithmKind::Tunnel => Algorithm::Tunnel(Default::default()),
            AlgorithmKind::RandomFill => Algorithm::RandomFill(Default::default()),
            AlgorithmKind::MooreAutomaton => Algorithm::CellularAutomaton {
                fill: FillParams::default(),
                automaton: AutomatonParams {
                    neighborhood: Neighborhood::Moore,
                    ..Default::default()
                },
            },
            AlgorithmKind::VonNeumannAutomaton => Algorithm::CellularAutomaton {
                fill: FillParams::default(),
                automaton: AutomatonParams {
                    neighborhood: Neighborhood::VonNeumann,
                    ..Default::default()
                },
            },
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AlgorithmKind {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        AlgorithmKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Everything needed to produce one map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Map width in cells.
    pub width: i32,
    /// Map height in cells.
    pub height: i32,
    /// Seed fixing the output.
    pub seed: Seed,
    /// Algorithm and its parameters.
    pub algorithm: Algorithm,
}

/// Generates a map with the default [`ValueNoise`] sampler.
pub fn generate(request: &GenerationRequest) -> Result<Grid, GenerationError> {
    generate_with_sampler(request, &ValueNoise::new())
}

/// Generates a map, reading noise from `sampler`.
///
/// Identical requests produce identical grids.
pub fn generate_with_sampler<S>(
    request: &GenerationRequest,
    sampler: &S,
) -> Result<Grid, GenerationError>
where
    S: NoiseSampler + ?Sized,
{
    let GenerationRequest {
        width,
        height,
        seed,
        algorithm,
    } = *request;

    tracing::debug!(
        algorithm = %algorithm.kind(),
        width,
        height,
        seed = seed.value(),
        "generating map"
    );

    match &algorithm {
        Algorithm::Noise => noise_terrain(width, height, seed, sampler),
        Algorithm::SmoothedNoise(params) => {
            smoothed_noise_terrain(width, height, seed, params, sampler)
        }
        Algorithm::RandomWalk => random_walk_terrain(width, height, seed),
        Algorithm::SmoothedRandomWalk(params) => {
            smoothed_random_walk_terrain(width, height, seed, params)
        }
        Algorithm::NoiseCave(params) => noise_cave(width, height, seed, params, sampler),
        Algorithm::RandomWalkCave(params) => random_walk_cave(width, height, seed, params),
        Algorithm::Tunnel(params) => directional_tunnel(width, height, seed, params),
        Algorithm::RandomFill(params) => random_fill(width, height, seed, params),
        Algorithm::CellularAutomaton { fill, automaton } => {
            let mut grid = random_fill(width, height, seed, fill)?;
            smooth(&mut grid, automaton)?;
            Ok(grid)
        }
    }
}
