//! Command-line host: generate one map and print it.

use std::process::ExitCode;

use clap::Parser;
use delve_config::{CliArgs, Config};
use delve_grid::{Cell, Grid};
use delve_terrain::{GenerationRequest, generate};
use serde::Serialize;

/// JSON form of a generated map.
#[derive(Serialize)]
struct MapOutput<'a> {
    request: &'a GenerationRequest,
    floor_count: usize,
    content_hash: u64,
    grid: &'a Grid,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match delve_config::default_config_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    if let Err(e) = delve_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config))
    {
        eprintln!("Failed to initialize logging: {e}");
    }

    let seed = config.seed_source().next_seed();
    let request = config.request(seed);

    let grid = match generate(&request) {
        Ok(grid) => grid,
        Err(e) => {
            tracing::error!(%e, algorithm = %request.algorithm.kind(), "generation failed");
            eprintln!("generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let floor_count = grid.count(Cell::Floor);
    let content_hash = grid.content_hash();
    tracing::info!(
        seed = seed.value(),
        algorithm = %request.algorithm.kind(),
        floor_count,
        content_hash = format!("{content_hash:016x}"),
        "map generated"
    );

    if args.json {
        let output = MapOutput {
            request: &request,
            floor_count,
            content_hash,
            grid: &grid,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize map: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{grid}");
    }

    ExitCode::SUCCESS
}
