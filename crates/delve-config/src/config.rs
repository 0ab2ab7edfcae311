//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use delve_terrain::{Algorithm, FixedSeed, GenerationRequest, RandomSeed, Seed, SeedSource};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Map size.
    pub map: MapConfig,
    /// How the seed is chosen.
    pub seed: SeedConfig,
    /// Selected algorithm and its parameters.
    pub algorithm: Algorithm,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Map dimensions in cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

/// Seed policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeedConfig {
    /// Draw a fresh seed for every generation.
    pub randomize: bool,
    /// Seed used when `randomize` is off.
    pub value: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 34,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            randomize: true,
            value: 0.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Per-user configuration directory, `<config_dir>/delve`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("delve"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// The seed provider selected by the seed policy.
    pub fn seed_source(&self) -> Box<dyn SeedSource> {
        if self.seed.randomize {
            Box::new(RandomSeed::new())
        } else {
            Box::new(FixedSeed(Seed(self.seed.value)))
        }
    }

    /// A generation request for the configured map and algorithm.
    pub fn request(&self, seed: Seed) -> GenerationRequest {
        GenerationRequest {
            width: self.map.width,
            height: self.map.height,
            seed,
            algorithm: self.algorithm,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-reads `config.ron`: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use delve_terrain::{AutomatonParams, FillParams, Neighborhood, TunnelParams};

    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("width: 60"));
        assert!(ron_str.contains("height: 34"));
        assert!(ron_str.contains("randomize: true"));
    }

    #[test]
    fn test_config_roundtrip_with_parameters() {
        let config = Config {
            algorithm: Algorithm::CellularAutomaton {
                fill: FillParams {
                    fill_percentage: 0.52,
                    borders: false,
                },
                automaton: AutomatonParams {
                    neighborhood: Neighborhood::VonNeumann,
                    passes: 6,
                    borders: false,
                },
            },
            ..Default::default()
        };
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(map: (width: 100))").unwrap();
        assert_eq!(config.map.width, 100);
        assert_eq!(config.map.height, 34);
        assert_eq!(config.seed, SeedConfig::default());
        assert_eq!(config.algorithm, Algorithm::Noise);
    }

    #[test]
    fn test_partial_algorithm_parameters() {
        let config: Config = ron::from_str("(algorithm: Tunnel((max_width: 3)))").unwrap();
        assert_eq!(
            config.algorithm,
            Algorithm::Tunnel(TunnelParams {
                max_width: 3,
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.map.width = 128;
        config.seed.randomize = false;
        config.seed.value = 42.5;
        config.algorithm = Algorithm::RandomWalk;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("delve");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.map.height = 80;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.map.height), Some(80));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_fixed_seed_policy() {
        let mut config = Config::default();
        config.seed.randomize = false;
        config.seed.value = 17.0;
        let mut source = config.seed_source();
        assert_eq!(source.next_seed(), Seed(17.0));
        assert_eq!(source.next_seed(), Seed(17.0));
    }

    #[test]
    fn test_random_seed_policy_in_range() {
        let mut source = Config::default().seed_source();
        for _ in 0..100 {
            let seed = source.next_seed().value();
            assert!((0.0..delve_terrain::RANDOM_SEED_RANGE).contains(&seed));
        }
    }

    #[test]
    fn test_request_uses_map_and_algorithm() {
        let mut config = Config::default();
        config.algorithm = Algorithm::RandomWalk;
        let request = config.request(Seed(3.0));
        assert_eq!(request.width, 60);
        assert_eq!(request.height, 34);
        assert_eq!(request.seed, Seed(3.0));
        assert_eq!(request.algorithm, Algorithm::RandomWalk);
    }
}
