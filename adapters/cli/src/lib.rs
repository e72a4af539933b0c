#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Planet Builder experience.

mod config;
mod script;

pub use self::config::{resolve, ConfigFile, ConfigOverrides};
pub use self::script::{replay, ParseStepError, ReplayReport, ScriptStep};

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info};
use planet_builder_controller::Session;
use planet_builder_core::{GameConfig, WELCOME_BANNER};
use planet_builder_rendering::{Color, Presentation, RenderingBackend, Scene};
use planet_builder_rendering_macroquad::MacroquadBackend;

/// Title of the game window.
pub const WINDOW_TITLE: &str = "Planet Builder";

const BACKGROUND: Color = Color::from_rgb_u8(0x0b, 0x0d, 0x24);

/// Command-line arguments accepted by the `planet-builder` binary.
#[derive(Debug, Parser)]
#[command(name = "planet-builder", version, about = "Drag elements onto orbits and keep them stable.")]
pub struct Args {
    /// TOML file with `orbit_count`, `max_planets_per_orbit` and `explosion_duration_ms`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Flags overriding the config file.
    #[command(flatten)]
    pub overrides: ConfigOverrides,
    /// Mode to run; opens the window when omitted.
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Modes the binary can run in.
#[derive(Debug, Subcommand)]
pub enum Mode {
    /// Opens the interactive window.
    Window {
        /// Synchronise presentation with the display refresh rate.
        #[arg(long, overrides_with = "no_vsync")]
        vsync: bool,
        /// Render as fast as possible.
        #[arg(long = "no-vsync", overrides_with = "vsync")]
        no_vsync: bool,
    },
    /// Replays scripted drops without a window and prints the final state.
    Replay {
        /// Steps such as `fire@0`, `water@1` or `reset`.
        #[arg(required = true, value_name = "DROP")]
        steps: Vec<ScriptStep>,
    },
}

impl Args {
    /// Loads the config file, if any, and merges it with the flag overrides.
    pub fn game_config(&self) -> Result<GameConfig> {
        let file = self.config.as_deref().map(ConfigFile::load).transpose()?;
        let config = resolve(file.as_ref(), &self.overrides)?;
        debug!("resolved configuration: {config:?}");
        Ok(config)
    }
}

/// Runs the mode selected by `args`.
pub fn run(args: &Args) -> Result<()> {
    let config = args.game_config()?;
    println!("{WELCOME_BANNER}");

    match &args.mode {
        Some(Mode::Replay { steps }) => {
            let report = replay(config, steps)?;
            info!(
                "replay finished: {} detonations, {} rejected drops",
                report.detonations, report.rejected
            );
            println!("{report}");
            Ok(())
        }
        Some(Mode::Window { vsync, no_vsync }) => run_window(config, vsync_preference(*vsync, *no_vsync)),
        None => run_window(config, None),
    }
}

fn vsync_preference(vsync: bool, no_vsync: bool) -> Option<bool> {
    if no_vsync {
        Some(false)
    } else if vsync {
        Some(true)
    } else {
        None
    }
}

fn run_window(config: GameConfig, vsync: Option<bool>) -> Result<()> {
    let scene = Scene::for_config(&config)?;
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND, scene);
    let mut session = Session::new(config);

    let backend = match vsync {
        Some(enabled) => MacroquadBackend::new().with_vsync(enabled),
        None => MacroquadBackend::new(),
    };

    info!("opening window with {} orbits", config.orbit_count());
    backend.run(presentation, move |_dt, input, scene| {
        if let Some(outcome) = session.handle_frame(input, scene) {
            debug!("drop settled: {outcome:?}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_vsync_wins_over_vsync() {
        assert_eq!(vsync_preference(true, true), Some(false));
        assert_eq!(vsync_preference(true, false), Some(true));
        assert_eq!(vsync_preference(false, false), None);
    }

    #[test]
    fn window_is_the_default_mode() {
        let args = Args::try_parse_from(["planet-builder"]).expect("no arguments required");
        assert!(args.mode.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn replay_requires_steps() {
        assert!(Args::try_parse_from(["planet-builder", "replay"]).is_err());
    }

    #[test]
    fn replay_steps_are_parsed_by_clap() {
        let args = Args::try_parse_from([
            "planet-builder",
            "--orbit-count",
            "2",
            "replay",
            "fire@0",
            "reset",
        ])
        .expect("valid arguments");

        assert_eq!(args.overrides.orbit_count, Some(2));
        match args.mode {
            Some(Mode::Replay { steps }) => {
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[1], ScriptStep::Reset);
            }
            other => panic!("expected replay mode, got {other:?}"),
        }
    }

    #[test]
    fn malformed_step_is_a_usage_error() {
        assert!(Args::try_parse_from(["planet-builder", "replay", "lava@0"]).is_err());
    }
}
