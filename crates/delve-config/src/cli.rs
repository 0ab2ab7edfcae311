//! Command-line argument parsing for the map generator.

use std::path::PathBuf;

use clap::Parser;
use delve_terrain::AlgorithmKind;

use crate::Config;

/// Delve command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "delve", about = "Procedural 2D map generator")]
pub struct CliArgs {
    /// Map width in cells.
    #[arg(long)]
    pub width: Option<i32>,

    /// Map height in cells.
    #[arg(long)]
    pub height: Option<i32>,

    /// Fixed seed. Disables seed randomization.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<f64>,

    /// Algorithm family, e.g. `noise`, `random-walk-cave`, `moore-automaton`.
    #[arg(long)]
    pub algorithm: Option<AlgorithmKind>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the map as JSON instead of a text preview.
    #[arg(long)]
    pub json: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Choosing the family the config already holds keeps its parameters;
    /// any other family starts from its defaults.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.map.width = w;
        }
        if let Some(h) = args.height {
            self.map.height = h;
        }
        if let Some(seed) = args.seed {
            self.seed.randomize = false;
            self.seed.value = seed;
        }
        if let Some(kind) = args.algorithm
            && self.algorithm.kind() != kind
        {
            self.algorithm = kind.default_algorithm();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
