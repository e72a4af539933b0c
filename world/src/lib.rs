#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative orbit occupancy state for Planet Builder.

use planet_builder_core::{
    Command, ElementType, Event, GameConfig, OrbitIndex, PlacementError, WELCOME_BANNER,
};

/// Represents the authoritative Planet Builder world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    orbits: Vec<Vec<ElementType>>,
}

impl World {
    /// Creates an empty world laid out according to `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let orbit_count = usize::try_from(config.orbit_count()).unwrap_or(usize::MAX);
        Self {
            banner: WELCOME_BANNER,
            config,
            orbits: vec![Vec::new(); orbit_count],
        }
    }

    fn orbit_mut(&mut self, orbit: OrbitIndex) -> Option<&mut Vec<ElementType>> {
        let index = usize::try_from(orbit.get()).ok()?;
        self.orbits.get_mut(index)
    }

    fn place(&mut self, element: ElementType, orbit: OrbitIndex, out_events: &mut Vec<Event>) {
        let capacity = self.config.max_per_orbit();
        let Some(elements) = self.orbit_mut(orbit) else {
            out_events.push(Event::PlacementRejected {
                element,
                orbit,
                reason: PlacementError::OrbitOutOfRange,
            });
            return;
        };

        let occupied = u32::try_from(elements.len()).unwrap_or(u32::MAX);
        if occupied >= capacity {
            out_events.push(Event::PlacementRejected {
                element,
                orbit,
                reason: PlacementError::OrbitFull,
            });
            return;
        }

        elements.push(element);
        out_events.push(Event::ElementPlaced {
            element,
            orbit,
            slot: occupied + 1,
        });
    }

    fn clear(&mut self, orbit: OrbitIndex, out_events: &mut Vec<Event>) {
        let Some(elements) = self.orbit_mut(orbit) else {
            return;
        };

        let removed = u32::try_from(elements.len()).unwrap_or(u32::MAX);
        elements.clear();
        out_events.push(Event::OrbitCleared { orbit, removed });
    }

    fn all_orbits(&self) -> Vec<OrbitIndex> {
        (0..self.config.orbit_count()).map(OrbitIndex::new).collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Requests that cannot be honoured leave the world untouched. Placements
/// report the failure through [`Event::PlacementRejected`]; detonations of a
/// pair that does not exist are dropped without an event.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceElement { element, orbit } => world.place(element, orbit, out_events),
        Command::Detonate { inner } => {
            let outer = inner.outer();
            if u64::from(outer.get()) >= u64::from(world.config.orbit_count()) {
                return;
            }

            out_events.push(Event::Exploded { inner, outer });
            world.clear(inner, out_events);
            world.clear(outer, out_events);
        }
        Command::ClearOrbits { orbits } => {
            for orbit in orbits {
                world.clear(orbit, out_events);
            }
        }
        Command::ResetSystem => {
            for orbit in world.all_orbits() {
                world.clear(orbit, out_events);
            }
            out_events.push(Event::SystemReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use planet_builder_core::{ElementType, GameConfig, OrbitIndex, OrbitView};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the configuration the world was laid out with.
    #[must_use]
    pub fn config(world: &World) -> GameConfig {
        world.config
    }

    /// Exposes a read-only view of every orbit.
    #[must_use]
    pub fn orbit_view(world: &World) -> OrbitView<'_> {
        OrbitView::new(&world.orbits, world.config.max_per_orbit())
    }

    /// Elements on the requested orbit in arrival order.
    #[must_use]
    pub fn orbit(world: &World, orbit: OrbitIndex) -> Option<&[ElementType]> {
        orbit_view(world).orbit(orbit)
    }

    /// Reports whether the orbit exists and has room for another element.
    #[must_use]
    pub fn can_accept(world: &World, orbit: OrbitIndex) -> bool {
        orbit_view(world).can_accept(orbit)
    }
}
