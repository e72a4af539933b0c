use std::{io::Write, time::Duration};

use clap::Parser;
use planet_builder_cli::{resolve, Args, ConfigFile, ConfigOverrides};
use planet_builder_core::{ConfigError, GameConfig};

#[test]
fn defaults_apply_without_file_or_flags() {
    let config = resolve(None, &ConfigOverrides::default()).expect("defaults are valid");

    assert_eq!(config, GameConfig::default());
}

#[test]
fn file_values_replace_defaults() {
    let file = ConfigFile::from_toml("orbit_count = 6\nexplosion_duration_ms = 400\n")
        .expect("valid toml");

    let config = resolve(Some(&file), &ConfigOverrides::default()).expect("valid config");

    assert_eq!(config.orbit_count(), 6);
    assert_eq!(config.max_per_orbit(), GameConfig::DEFAULT_MAX_PER_ORBIT);
    assert_eq!(config.explosion_duration(), Duration::from_millis(400));
}

#[test]
fn flags_take_precedence_over_file() {
    let file = ConfigFile::from_toml("orbit_count = 6\nmax_planets_per_orbit = 5\n")
        .expect("valid toml");
    let overrides = ConfigOverrides {
        orbit_count: Some(2),
        ..ConfigOverrides::default()
    };

    let config = resolve(Some(&file), &overrides).expect("valid config");

    assert_eq!(config.orbit_count(), 2);
    assert_eq!(config.max_per_orbit(), 5);
}

#[test]
fn zero_capacity_is_rejected() {
    let overrides = ConfigOverrides {
        max_planets_per_orbit: Some(0),
        ..ConfigOverrides::default()
    };

    assert_eq!(resolve(None, &overrides), Err(ConfigError::ZeroCapacity));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(ConfigFile::from_toml("orbits = 3\n").is_err());
}

#[test]
fn config_file_is_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temporary file");
    writeln!(file, "max_planets_per_orbit = 2").expect("write config");
    let path = file.path().to_str().expect("utf-8 path").to_owned();

    let args = Args::try_parse_from(["planet-builder", "--config", path.as_str()])
        .expect("valid arguments");
    let config = args.game_config().expect("config loads");

    assert_eq!(config.max_per_orbit(), 2);
    assert_eq!(config.orbit_count(), GameConfig::DEFAULT_ORBIT_COUNT);
}

#[test]
fn missing_config_file_reports_path() {
    let args = Args::try_parse_from(["planet-builder", "--config", "/nonexistent/planet.toml"])
        .expect("valid arguments");

    let error = args.game_config().expect_err("file does not exist");

    assert!(
        format!("{error:#}").contains("/nonexistent/planet.toml"),
        "error should name the file: {error:#}"
    );
}
