//! Layered game configuration: defaults, then a TOML file, then flags.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use planet_builder_core::{ConfigError, GameConfig};
use serde::Deserialize;

/// Settings read from a `--config` TOML file. Every key is optional.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of concentric orbits.
    pub orbit_count: Option<u32>,
    /// Capacity of each orbit.
    pub max_planets_per_orbit: Option<u32>,
    /// Explosion lifetime in milliseconds.
    pub explosion_duration_ms: Option<u64>,
}

impl ConfigFile {
    /// Parses a configuration document.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Reads and parses the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&source)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Command-line overrides that take precedence over the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::Args)]
pub struct ConfigOverrides {
    /// Number of concentric orbits.
    #[arg(long, value_name = "COUNT")]
    pub orbit_count: Option<u32>,
    /// Maximum number of planets a single orbit holds.
    #[arg(long, value_name = "COUNT")]
    pub max_planets_per_orbit: Option<u32>,
    /// How long an explosion stays visible, in milliseconds.
    #[arg(long, value_name = "MILLIS")]
    pub explosion_duration_ms: Option<u64>,
}

/// Merges the layers into a validated [`GameConfig`].
pub fn resolve(
    file: Option<&ConfigFile>,
    overrides: &ConfigOverrides,
) -> Result<GameConfig, ConfigError> {
    let file = file.copied().unwrap_or_default();

    let orbit_count = overrides
        .orbit_count
        .or(file.orbit_count)
        .unwrap_or(GameConfig::DEFAULT_ORBIT_COUNT);
    let max_per_orbit = overrides
        .max_planets_per_orbit
        .or(file.max_planets_per_orbit)
        .unwrap_or(GameConfig::DEFAULT_MAX_PER_ORBIT);
    let explosion_duration = overrides
        .explosion_duration_ms
        .or(file.explosion_duration_ms)
        .map_or(GameConfig::DEFAULT_EXPLOSION_DURATION, Duration::from_millis);

    GameConfig::new(orbit_count, max_per_orbit, explosion_duration)
}
