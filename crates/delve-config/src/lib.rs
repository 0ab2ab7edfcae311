//! Configuration for the delve map generator.
//!
//! Settings persist to disk as RON. CLI arguments parsed with clap override
//! whatever the file holds, and unknown or missing fields fall back to
//! defaults so older and newer files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, MapConfig, SeedConfig, default_config_dir};
pub use error::ConfigError;
