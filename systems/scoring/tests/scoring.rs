use planet_builder_core::{Command, ElementType, Event, OrbitIndex, Score};
use planet_builder_system_scoring::{score, Scoring};
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

#[test]
fn empty_world_scores_zero() {
    let world = World::default();
    assert_eq!(score(query::orbit_view(&world)), Score::ZERO);
}

#[test]
fn outer_orbits_are_worth_more() {
    use ElementType::*;
    let inner = world_with(&[&[Earth]]);
    let outer = world_with(&[&[], &[], &[], &[Earth]]);

    assert_eq!(score(query::orbit_view(&inner)), Score::new(1));
    assert_eq!(score(query::orbit_view(&outer)), Score::new(4));
}

#[test]
fn reset_scenario_scores_seventeen_then_zero() {
    use ElementType::*;
    let mut world = world_with(&[&[Fire], &[Water, Earth], &[], &[Fire, Fire, Fire]]);
    let mut scoring = Scoring::new();

    let placed = [Event::ElementPlaced {
        element: Fire,
        orbit: OrbitIndex::new(3),
        slot: 3,
    }];
    assert_eq!(
        scoring.handle(&placed, query::orbit_view(&world)),
        Some(Score::new(17))
    );

    let mut events = Vec::new();
    world::apply(&mut world, Command::ResetSystem, &mut events);

    assert_eq!(
        scoring.handle(&events, query::orbit_view(&world)),
        Some(Score::ZERO)
    );
    assert_eq!(scoring.current(), Score::ZERO);
}

#[test]
fn rejected_placement_does_not_recompute() {
    use ElementType::*;
    let world = world_with(&[&[Earth, Earth, Earth]]);
    let mut scoring = Scoring::new();

    let rejected = [Event::PlacementRejected {
        element: Earth,
        orbit: OrbitIndex::new(0),
        reason: planet_builder_core::PlacementError::OrbitFull,
    }];

    assert_eq!(scoring.handle(&rejected, query::orbit_view(&world)), None);
    assert_eq!(scoring.current(), Score::ZERO);
}
