//! Headless replay of scripted drops.

use std::{fmt, num::ParseIntError, str::FromStr};

use anyhow::Result;
use log::info;
use planet_builder_controller::{DropOutcome, OrbitSystem};
use planet_builder_core::{DropEvent, ElementType, GameConfig, OrbitIndex, ParseElementError, Score};
use planet_builder_rendering::{LogSurface, Scene};
use thiserror::Error;

/// One scripted action: a drop written `<element>@<orbit>`, or `reset`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    /// Drop an element onto an orbit.
    Drop(DropEvent),
    /// Press the reset trigger.
    Reset,
}

/// Errors raised while parsing a [`ScriptStep`].
#[derive(Debug, Error)]
pub enum ParseStepError {
    /// The step names neither `reset` nor an orbit after `@`.
    #[error("expected `<element>@<orbit>` or `reset`, got `{0}`")]
    MissingOrbit(String),
    /// The element part is not a known element.
    #[error(transparent)]
    Element(#[from] ParseElementError),
    /// The orbit part is not a non-negative integer.
    #[error("invalid orbit `{input}`")]
    Orbit {
        /// Text that failed to parse.
        input: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for ScriptStep {
    type Err = ParseStepError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }

        let (element, orbit) = trimmed
            .split_once('@')
            .ok_or_else(|| ParseStepError::MissingOrbit(trimmed.to_owned()))?;
        let element: ElementType = element.parse()?;
        let orbit = orbit
            .trim()
            .parse::<u32>()
            .map_err(|source| ParseStepError::Orbit {
                input: orbit.to_owned(),
                source,
            })?;

        Ok(Self::Drop(DropEvent::new(element, OrbitIndex::new(orbit))))
    }
}

/// Final state of a replayed script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayReport {
    /// Contents of every orbit, innermost first.
    pub orbits: Vec<Vec<ElementType>>,
    /// Score after the last step.
    pub score: Score,
    /// Number of drops the capacity gate refused.
    pub rejected: usize,
    /// Number of adjacent pairs that exploded across the whole script.
    pub detonations: usize,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, orbit) in self.orbits.iter().enumerate() {
            write!(f, "orbit {index}:")?;
            for element in orbit {
                write!(f, " {}", element.glyph())?;
            }
            writeln!(f)?;
        }
        write!(f, "Score: {}", self.score)
    }
}

/// Plays `steps` against a fresh system and a logging surface.
pub fn replay(config: GameConfig, steps: &[ScriptStep]) -> Result<ReplayReport> {
    let layout = Scene::for_config(&config)?.layout;
    let mut surface = LogSurface::new(layout);
    let mut system = OrbitSystem::new(config);
    let mut rejected = 0;
    let mut detonations = 0;

    for step in steps {
        match *step {
            ScriptStep::Drop(drop) => match system.handle_drop(drop, &mut surface) {
                DropOutcome::Placed {
                    detonations: exploded,
                    score,
                } => {
                    detonations += exploded;
                    info!("{} on orbit {}: score {score}", drop.element, drop.orbit);
                }
                DropOutcome::Rejected { reason } => {
                    rejected += 1;
                    info!("{} on orbit {} ignored: {reason}", drop.element, drop.orbit);
                }
            },
            ScriptStep::Reset => system.reset(&mut surface),
        }
    }

    let orbits = system
        .orbits()
        .iter()
        .map(|(_, elements)| elements.to_vec())
        .collect();

    Ok(ReplayReport {
        orbits,
        score: system.score(),
        rejected,
        detonations,
    })
}
