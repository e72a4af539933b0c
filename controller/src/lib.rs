#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Orchestration of the Planet Builder rules.
//!
//! [`OrbitSystem`] owns the world and the pure systems, funnels every drop
//! through the capacity gate, and mirrors each world event onto a
//! [`PresentationSurface`] supplied by the caller. [`Session`] sits on top and
//! turns raw pointer frames into drag gestures.

mod session;

pub use self::session::Session;

use log::{debug, info};
use planet_builder_core::{
    Command, DropEvent, ElementType, Event, GameConfig, OrbitIndex, OrbitView, PlacementError,
    Score,
};
use planet_builder_rendering::{token_offset, PresentationSurface, TokenId};
use planet_builder_system_scoring::Scoring;
use planet_builder_system_stability::Stability;
use planet_builder_world::{self as world, query, World};

/// Result of handing a drop to the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The element was placed; stability and scoring ran afterwards.
    Placed {
        /// Number of adjacent pairs that exploded as a consequence.
        detonations: usize,
        /// Score after the drop settled.
        score: Score,
    },
    /// The drop was ignored without touching any state.
    Rejected {
        /// Why the drop could not be honoured.
        reason: PlacementError,
    },
}

/// Explicitly owned game state plus the systems that act on it.
#[derive(Debug)]
pub struct OrbitSystem {
    world: World,
    stability: Stability,
    scoring: Scoring,
    tokens: Vec<Vec<TokenId>>,
    events: Vec<Event>,
    scratch_events: Vec<Event>,
    scratch_commands: Vec<Command>,
}

impl OrbitSystem {
    /// Creates an empty system laid out according to `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let orbit_count = usize::try_from(config.orbit_count()).unwrap_or(usize::MAX);
        Self {
            world: World::new(config),
            stability: Stability::new(),
            scoring: Scoring::new(),
            tokens: vec![Vec::new(); orbit_count],
            events: Vec::new(),
            scratch_events: Vec::new(),
            scratch_commands: Vec::new(),
        }
    }

    /// Configuration the system was created with.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        query::config(&self.world)
    }

    /// Read-only view of every orbit.
    #[must_use]
    pub fn orbits(&self) -> OrbitView<'_> {
        query::orbit_view(&self.world)
    }

    /// Score derived from the current occupancy.
    #[must_use]
    pub fn score(&self) -> Score {
        self.scoring.current()
    }

    /// Events produced by the most recent operation, in order.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Tokens currently shown on `orbit`, in arrival order.
    #[must_use]
    pub fn tokens(&self, orbit: OrbitIndex) -> &[TokenId] {
        usize::try_from(orbit.get())
            .ok()
            .and_then(|index| self.tokens.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports whether `orbit` exists and has room for another element.
    #[must_use]
    pub fn can_accept(&self, orbit: OrbitIndex) -> bool {
        query::can_accept(&self.world, orbit)
    }

    /// Handles a completed drop: placement, then stability, then scoring.
    ///
    /// A drop the capacity gate refuses leaves the world, the surface and the
    /// score untouched.
    pub fn handle_drop<S>(&mut self, drop: DropEvent, surface: &mut S) -> DropOutcome
    where
        S: PresentationSurface + ?Sized,
    {
        self.events.clear();

        if !self.can_accept(drop.orbit) {
            let reason = if query::orbit(&self.world, drop.orbit).is_some() {
                PlacementError::OrbitFull
            } else {
                PlacementError::OrbitOutOfRange
            };
            debug!("drop of {} on orbit {} ignored: {reason}", drop.element, drop.orbit);
            return DropOutcome::Rejected { reason };
        }

        self.place(drop.element, drop.orbit, surface);
        let detonations = self.check_stability(surface);
        let score = self.update_score(surface);

        DropOutcome::Placed { detonations, score }
    }

    /// Appends `element` to `orbit` and shows its token, when capacity allows.
    pub fn place<S>(&mut self, element: ElementType, orbit: OrbitIndex, surface: &mut S)
    where
        S: PresentationSurface + ?Sized,
    {
        self.dispatch(Command::PlaceElement { element, orbit }, surface);
    }

    /// Runs one stability pass and detonates every conflicting pair.
    ///
    /// Returns the number of pairs that exploded.
    pub fn check_stability<S>(&mut self, surface: &mut S) -> usize
    where
        S: PresentationSurface + ?Sized,
    {
        let mut commands = std::mem::take(&mut self.scratch_commands);
        commands.clear();
        self.stability
            .evaluate(query::orbit_view(&self.world), &mut commands);

        let detonations = commands.len();
        for command in commands.drain(..) {
            self.dispatch(command, surface);
        }
        self.scratch_commands = commands;

        detonations
    }

    /// Empties the listed orbits and removes their tokens.
    pub fn clear<S>(&mut self, orbits: &[OrbitIndex], surface: &mut S)
    where
        S: PresentationSurface + ?Sized,
    {
        self.dispatch(
            Command::ClearOrbits {
                orbits: orbits.to_vec(),
            },
            surface,
        );
    }

    /// Recomputes the score from occupancy and pushes it to the surface.
    pub fn update_score<S>(&mut self, surface: &mut S) -> Score
    where
        S: PresentationSurface + ?Sized,
    {
        let score = self.scoring.refresh(query::orbit_view(&self.world));
        surface.display_score(score);
        score
    }

    /// Clears every orbit and displays the resulting zero score.
    pub fn reset<S>(&mut self, surface: &mut S)
    where
        S: PresentationSurface + ?Sized,
    {
        self.events.clear();
        self.dispatch(Command::ResetSystem, surface);

        if let Some(score) = self
            .scoring
            .handle(&self.events, query::orbit_view(&self.world))
        {
            surface.display_score(score);
        }
        info!("system reset");
    }

    fn dispatch<S>(&mut self, command: Command, surface: &mut S)
    where
        S: PresentationSurface + ?Sized,
    {
        let mut events = std::mem::take(&mut self.scratch_events);
        events.clear();
        world::apply(&mut self.world, command, &mut events);

        let config = query::config(&self.world);
        for event in &events {
            match *event {
                Event::ElementPlaced {
                    element,
                    orbit,
                    slot,
                } => {
                    let width = surface.zone_width(orbit);
                    let offset = token_offset(slot, config.max_per_orbit(), width);
                    let token = surface.spawn_token(orbit, element, offset);
                    if let Some(tokens) = self.orbit_tokens_mut(orbit) {
                        tokens.push(token);
                    }
                }
                Event::PlacementRejected {
                    element,
                    orbit,
                    reason,
                } => {
                    debug!("placement of {element} on orbit {orbit} rejected: {reason}");
                }
                Event::Exploded { inner, outer } => {
                    debug!("orbits {inner} and {outer} exploded");
                    let _ = surface.spawn_explosion(inner, config.explosion_duration());
                }
                Event::OrbitCleared { orbit, .. } => {
                    let removed = self
                        .orbit_tokens_mut(orbit)
                        .map(std::mem::take)
                        .unwrap_or_default();
                    for token in removed {
                        surface.remove_token(token);
                    }
                }
                Event::SystemReset => {}
            }
        }

        self.events.append(&mut events);
        self.scratch_events = events;
    }

    fn orbit_tokens_mut(&mut self, orbit: OrbitIndex) -> Option<&mut Vec<TokenId>> {
        let index = usize::try_from(orbit.get()).ok()?;
        self.tokens.get_mut(index)
    }
}

impl Default for OrbitSystem {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
