#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Planet Builder game.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate pointer gestures
//! into [`DropEvent`] values, the controller turns those into [`Command`]
//! values, the world executes commands via its `apply` entry point, and then
//! broadcasts [`Event`] values for systems to react to deterministically.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Planet Builder.";

/// Glyph shown while an explosion effect is visible.
pub const EXPLOSION_GLYPH: &str = "💥";

/// Element carried by a draggable token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// Inert element that never takes part in a conflict.
    Earth,
    /// Conflicts with water on an adjacent orbit.
    Fire,
    /// Conflicts with fire on an adjacent orbit.
    Water,
}

impl ElementType {
    /// Every element in palette order.
    pub const ALL: [ElementType; 3] = [Self::Earth, Self::Fire, Self::Water];

    /// Glyph used when a token carrying this element is displayed.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Earth => "🌍",
            Self::Fire => "🔥",
            Self::Water => "💧",
        }
    }

    /// Drag payload string that identifies the element.
    #[must_use]
    pub const fn payload(self) -> &'static str {
        match self {
            Self::Earth => "earth",
            Self::Fire => "fire",
            Self::Water => "water",
        }
    }

    /// Reports whether this element explodes when it meets `other` across an orbit boundary.
    #[must_use]
    pub const fn opposes(self, other: ElementType) -> bool {
        matches!(
            (self, other),
            (Self::Fire, Self::Water) | (Self::Water, Self::Fire)
        )
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}

/// Error returned when a drag payload does not name a known element.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown element payload `{payload}`")]
pub struct ParseElementError {
    payload: String,
}

impl ParseElementError {
    /// Payload that failed to parse.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl FromStr for ElementType {
    type Err = ParseElementError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|element| element.payload().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseElementError {
                payload: value.to_owned(),
            })
    }
}

/// Zero-based index of an orbit, counted from the innermost ring outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrbitIndex(u32);

impl OrbitIndex {
    /// Creates a new orbit index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index of the orbit directly outside this one.
    #[must_use]
    pub const fn outer(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Score multiplier applied to every token on this orbit.
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.0.saturating_add(1)
    }
}

impl fmt::Display for OrbitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Points accumulated from orbit occupancy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    /// Score of an empty system.
    pub const ZERO: Score = Score(0);

    /// Wraps the provided numeric score.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric score.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structured drop delivered by the input source once a drag gesture completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DropEvent {
    /// Element carried by the gesture.
    pub element: ElementType,
    /// Orbit zone that received the drop. May lie outside the configured range.
    pub orbit: OrbitIndex,
}

impl DropEvent {
    /// Creates a new drop event.
    #[must_use]
    pub const fn new(element: ElementType, orbit: OrbitIndex) -> Self {
        Self { element, orbit }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that an element be appended to an orbit.
    PlaceElement {
        /// Element to place.
        element: ElementType,
        /// Orbit receiving the element.
        orbit: OrbitIndex,
    },
    /// Requests that an adjacent pair of orbits explode and clear.
    Detonate {
        /// Inner orbit of the conflicting pair. The explosion is anchored here.
        inner: OrbitIndex,
    },
    /// Requests that the listed orbits be emptied.
    ClearOrbits {
        /// Orbits to clear, processed in order.
        orbits: Vec<OrbitIndex>,
    },
    /// Requests that every orbit be emptied.
    ResetSystem,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an element was appended to an orbit.
    ElementPlaced {
        /// Element that was placed.
        element: ElementType,
        /// Orbit that received the element.
        orbit: OrbitIndex,
        /// One-based arrival position of the element within its orbit.
        slot: u32,
    },
    /// Reports that a placement request was rejected.
    PlacementRejected {
        /// Element requested for placement.
        element: ElementType,
        /// Orbit named in the request.
        orbit: OrbitIndex,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that an adjacent pair of orbits exploded.
    Exploded {
        /// Orbit the explosion is anchored to.
        inner: OrbitIndex,
        /// Orbit directly outside the anchor.
        outer: OrbitIndex,
    },
    /// Confirms that an orbit was emptied.
    OrbitCleared {
        /// Orbit that was emptied.
        orbit: OrbitIndex,
        /// Number of elements removed. Zero for an already-empty orbit.
        removed: u32,
    },
    /// Announces that every orbit was emptied by an explicit reset.
    SystemReset,
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The orbit already holds the configured maximum number of elements.
    #[error("orbit is at capacity")]
    OrbitFull,
    /// The orbit index lies outside the configured orbit count.
    #[error("orbit index is out of range")]
    OrbitOutOfRange,
}

/// Read-only view into the orbit occupancy model.
#[derive(Clone, Copy, Debug)]
pub struct OrbitView<'a> {
    orbits: &'a [Vec<ElementType>],
    max_per_orbit: u32,
}

impl<'a> OrbitView<'a> {
    /// Captures a new view backed by the provided orbit slice.
    #[must_use]
    pub fn new(orbits: &'a [Vec<ElementType>], max_per_orbit: u32) -> Self {
        Self {
            orbits,
            max_per_orbit,
        }
    }

    /// Number of orbits in the system.
    #[must_use]
    pub fn orbit_count(&self) -> usize {
        self.orbits.len()
    }

    /// Maximum number of elements any orbit may hold.
    #[must_use]
    pub const fn max_per_orbit(&self) -> u32 {
        self.max_per_orbit
    }

    /// Elements on the orbit in arrival order, or `None` when out of range.
    #[must_use]
    pub fn orbit(&self, orbit: OrbitIndex) -> Option<&'a [ElementType]> {
        let index = usize::try_from(orbit.get()).ok()?;
        self.orbits.get(index).map(Vec::as_slice)
    }

    /// Reports whether the orbit holds at least one instance of `element`.
    #[must_use]
    pub fn contains(&self, orbit: OrbitIndex, element: ElementType) -> bool {
        self.orbit(orbit)
            .map_or(false, |elements| elements.contains(&element))
    }

    /// Reports whether the orbit exists and has room for another element.
    #[must_use]
    pub fn can_accept(&self, orbit: OrbitIndex) -> bool {
        self.orbit(orbit).map_or(false, |elements| {
            u32::try_from(elements.len()).map_or(false, |len| len < self.max_per_orbit)
        })
    }

    /// Iterator over every orbit paired with its index, innermost first.
    pub fn iter(&self) -> impl Iterator<Item = (OrbitIndex, &'a [ElementType])> + 'a {
        self.orbits
            .iter()
            .enumerate()
            .filter_map(|(index, elements)| {
                let index = u32::try_from(index).ok()?;
                Some((OrbitIndex::new(index), elements.as_slice()))
            })
    }
}

/// Tunable constants that shape a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    orbit_count: u32,
    max_per_orbit: u32,
    explosion_duration: Duration,
}

impl GameConfig {
    /// Number of orbits in the reference layout.
    pub const DEFAULT_ORBIT_COUNT: u32 = 4;

    /// Capacity of each orbit in the reference layout.
    pub const DEFAULT_MAX_PER_ORBIT: u32 = 3;

    /// Lifetime of an explosion effect in the reference layout.
    pub const DEFAULT_EXPLOSION_DURATION: Duration = Duration::from_millis(1000);

    /// Creates a validated configuration.
    ///
    /// Returns an error when either the orbit count or the per-orbit capacity is zero.
    pub fn new(
        orbit_count: u32,
        max_per_orbit: u32,
        explosion_duration: Duration,
    ) -> Result<Self, ConfigError> {
        if orbit_count == 0 {
            return Err(ConfigError::NoOrbits);
        }
        if max_per_orbit == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        Ok(Self {
            orbit_count,
            max_per_orbit,
            explosion_duration,
        })
    }

    /// Number of concentric orbits.
    #[must_use]
    pub const fn orbit_count(&self) -> u32 {
        self.orbit_count
    }

    /// Maximum number of elements a single orbit may hold.
    #[must_use]
    pub const fn max_per_orbit(&self) -> u32 {
        self.max_per_orbit
    }

    /// How long an explosion effect stays visible.
    #[must_use]
    pub const fn explosion_duration(&self) -> Duration {
        self.explosion_duration
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            orbit_count: Self::DEFAULT_ORBIT_COUNT,
            max_per_orbit: Self::DEFAULT_MAX_PER_ORBIT,
            explosion_duration: Self::DEFAULT_EXPLOSION_DURATION,
        }
    }
}

/// Errors raised while validating a [`GameConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The system needs at least one orbit.
    #[error("orbit count must be positive")]
    NoOrbits,
    /// Every orbit needs room for at least one element.
    #[error("max planets per orbit must be positive")]
    ZeroCapacity,
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ElementType, GameConfig, OrbitIndex, OrbitView, PlacementError};
    use serde::{de::DeserializeOwned, Serialize};
    use std::time::Duration;

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::OrbitFull);
    }

    #[test]
    fn payload_parsing_ignores_case_and_whitespace() {
        assert_eq!(" Fire\n".parse::<ElementType>(), Ok(ElementType::Fire));
        assert_eq!("WATER".parse::<ElementType>(), Ok(ElementType::Water));

        let error = "plasma"
            .parse::<ElementType>()
            .expect_err("unknown payload must be rejected");
        assert_eq!(error.payload(), "plasma");
    }

    #[test]
    fn only_fire_and_water_oppose_each_other() {
        assert!(ElementType::Fire.opposes(ElementType::Water));
        assert!(ElementType::Water.opposes(ElementType::Fire));
        assert!(!ElementType::Fire.opposes(ElementType::Fire));
        for element in ElementType::ALL {
            assert!(!ElementType::Earth.opposes(element));
            assert!(!element.opposes(ElementType::Earth));
        }
    }

    #[test]
    fn glyphs_are_distinct_per_element() {
        assert_eq!(ElementType::Earth.glyph(), "🌍");
        assert_eq!(ElementType::Fire.glyph(), "🔥");
        assert_eq!(ElementType::Water.glyph(), "💧");
    }

    #[test]
    fn orbit_view_rejects_out_of_range_and_full_orbits() {
        let orbits = vec![
            vec![ElementType::Earth],
            vec![ElementType::Fire, ElementType::Fire],
        ];
        let view = OrbitView::new(&orbits, 2);

        assert!(view.can_accept(OrbitIndex::new(0)));
        assert!(!view.can_accept(OrbitIndex::new(1)));
        assert!(!view.can_accept(OrbitIndex::new(2)));
        assert!(view.orbit(OrbitIndex::new(7)).is_none());
        assert!(view.contains(OrbitIndex::new(1), ElementType::Fire));
    }

    #[test]
    fn config_rejects_degenerate_layouts() {
        assert_eq!(
            GameConfig::new(0, 3, Duration::from_secs(1)),
            Err(ConfigError::NoOrbits)
        );
        assert_eq!(
            GameConfig::new(4, 0, Duration::from_secs(1)),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            GameConfig::new(4, 3, Duration::from_millis(1000)),
            Ok(GameConfig::default())
        );
    }
}
