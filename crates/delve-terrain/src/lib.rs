//! Procedural 2D map generation: side-view heightmaps, caves, tunnels, random
//! fill and cellular-automaton smoothing, all reproducible from a seed.

mod automaton;
mod cave;
mod error;
mod fill;
mod generate;
mod heightmap;
mod pool;
mod rng;
mod sampler;
mod seed;
mod tunnel;

pub use automaton::{AutomatonParams, smooth};
pub use cave::{
    NoiseCaveParams, WalkCaveParams, default_step_limit, noise_cave, random_walk_cave,
};
pub use delve_grid::{Cell, Grid, GridError, Neighborhood};
pub use error::GenerationError;
pub use fill::{FillParams, random_fill};
pub use generate::{
    Algorithm, AlgorithmKind, GenerationRequest, UnknownAlgorithm, generate,
    generate_with_sampler,
};
pub use heightmap::{
    SmoothedNoiseParams, SmoothedWalkParams, noise_terrain, random_walk_terrain,
    smoothed_noise_terrain, smoothed_random_walk_terrain,
};
pub use pool::{GeneratedMap, GenerationJob, GenerationPool, JobId};
pub use rng::GenRng;
pub use sampler::{NoiseSampler, ValueNoise};
pub use seed::{FixedSeed, RANDOM_SEED_RANGE, RandomSeed, Seed, SeedSource};
pub use tunnel::{TunnelParams, directional_tunnel};
