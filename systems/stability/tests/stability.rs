use planet_builder_core::{Command, ElementType, Event, OrbitIndex};
use planet_builder_system_stability::{conflicts, Stability};
use planet_builder_world::{self as world, query, World};

fn world_with(layout: &[&[ElementType]]) -> World {
    let mut world = World::default();
    let mut events = Vec::new();
    for (orbit, elements) in layout.iter().enumerate() {
        for element in elements.iter() {
            world::apply(
                &mut world,
                Command::PlaceElement {
                    element: *element,
                    orbit: OrbitIndex::new(orbit as u32),
                },
                &mut events,
            );
        }
    }
    world
}

fn placed_event() -> Event {
    Event::ElementPlaced {
        element: ElementType::Water,
        orbit: OrbitIndex::new(1),
        slot: 1,
    }
}

fn detonations(world: &World) -> Vec<Command> {
    let mut stability = Stability::new();
    let mut commands = Vec::new();
    stability.handle(&[placed_event()], query::orbit_view(world), &mut commands);
    commands
}

#[test]
fn fire_inside_water_detonates_pair() {
    use ElementType::*;
    let world = world_with(&[&[Fire], &[Water]]);

    assert_eq!(
        detonations(&world),
        vec![Command::Detonate {
            inner: OrbitIndex::new(0),
        }]
    );
}

#[test]
fn conflict_rule_is_symmetric() {
    use ElementType::*;
    let fire_inside = world_with(&[&[], &[Fire], &[Water]]);
    let water_inside = world_with(&[&[], &[Water], &[Fire]]);

    assert_eq!(detonations(&fire_inside), detonations(&water_inside));
    assert_eq!(
        detonations(&fire_inside),
        vec![Command::Detonate {
            inner: OrbitIndex::new(1),
        }]
    );
}

#[test]
fn earth_never_conflicts() {
    use ElementType::*;
    let world = world_with(&[&[Earth, Earth, Earth], &[Earth], &[Earth, Earth], &[Earth]]);

    assert!(detonations(&world).is_empty());
    for element in ElementType::ALL {
        assert!(!conflicts(&[Earth], &[element]));
        assert!(!conflicts(&[element], &[Earth]));
    }
}

#[test]
fn non_adjacent_orbits_never_conflict() {
    use ElementType::*;
    let middles: [&[ElementType]; 3] = [&[], &[Earth], &[Earth, Earth]];
    for middle in middles {
        let world = world_with(&[&[Fire], middle, &[Water]]);
        assert!(
            detonations(&world).is_empty(),
            "fire on orbit 0 and water on orbit 2 must not conflict with {middle:?} between them",
        );
    }
}

#[test]
fn mixed_orbit_conflicts_with_either_opposite() {
    use ElementType::*;
    assert!(conflicts(&[Earth, Fire], &[Earth, Water]));
    assert!(conflicts(&[Water, Earth], &[Fire]));
    assert!(!conflicts(&[Fire, Fire], &[Fire, Earth]));
}

#[test]
fn cleared_orbit_does_not_feed_the_next_pair() {
    use ElementType::*;
    let world = world_with(&[&[Fire], &[Water], &[Fire]]);

    assert_eq!(
        detonations(&world),
        vec![Command::Detonate {
            inner: OrbitIndex::new(0),
        }],
        "orbit 1 is emptied by the first pair and cannot explode again",
    );
}

#[test]
fn independent_pairs_detonate_in_index_order() {
    use ElementType::*;
    let world = world_with(&[&[Fire], &[Water], &[Water], &[Fire]]);

    assert_eq!(
        detonations(&world),
        vec![
            Command::Detonate {
                inner: OrbitIndex::new(0),
            },
            Command::Detonate {
                inner: OrbitIndex::new(2),
            },
        ]
    );
}

#[test]
fn scan_skipped_without_successful_placement() {
    use ElementType::*;
    let world = world_with(&[&[Fire], &[Water]]);
    let mut stability = Stability::new();
    let mut commands = Vec::new();

    stability.handle(
        &[Event::PlacementRejected {
            element: Water,
            orbit: OrbitIndex::new(1),
            reason: planet_builder_core::PlacementError::OrbitFull,
        }],
        query::orbit_view(&world),
        &mut commands,
    );
    stability.handle(&[], query::orbit_view(&world), &mut commands);

    assert!(commands.is_empty());
}
