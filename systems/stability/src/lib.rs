#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that detects fire/water conflicts between adjacent orbits.
//!
//! A single pass walks the adjacent pairs innermost first. A conflict clears
//! both orbits of the pair immediately, so later pairs in the same pass see
//! those orbits as empty. With `[Fire] [Water] [Fire]` only the inner pair
//! detonates and the outermost fire survives.

use log::debug;
use planet_builder_core::{Command, ElementType, Event, OrbitIndex, OrbitView};

/// Reports whether two orbits hold opposing elements.
///
/// Earth never contributes to a conflict.
#[must_use]
pub fn conflicts(inner: &[ElementType], outer: &[ElementType]) -> bool {
    inner
        .iter()
        .any(|element| outer.iter().any(|other| element.opposes(*other)))
}

/// Stability system that queues detonation commands for conflicting orbit pairs.
#[derive(Debug, Default)]
pub struct Stability {
    cleared: Vec<bool>,
    scratch: Vec<Command>,
}

impl Stability {
    /// Creates a new stability system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::Detonate` entries when the events include a successful placement.
    ///
    /// Rejected placements, clears and resets do not trigger a scan.
    pub fn handle(&mut self, events: &[Event], orbits: OrbitView<'_>, out: &mut Vec<Command>) {
        let placed = events
            .iter()
            .any(|event| matches!(event, Event::ElementPlaced { .. }));
        if !placed {
            return;
        }

        self.evaluate(orbits, out);
    }

    /// Runs one stability pass over the provided orbits regardless of the triggering events.
    pub fn evaluate(&mut self, orbits: OrbitView<'_>, out: &mut Vec<Command>) {
        self.cleared.clear();
        self.cleared.resize(orbits.orbit_count(), false);
        self.scratch.clear();

        let pairs: Vec<(OrbitIndex, &[ElementType])> = orbits.iter().collect();
        for window in pairs.windows(2) {
            let [(inner, inner_elements), (outer, outer_elements)] = window else {
                continue;
            };

            let inner_slot = slot(*inner);
            let outer_slot = slot(*outer);
            if self.is_cleared(inner_slot) || self.is_cleared(outer_slot) {
                continue;
            }

            if conflicts(inner_elements, outer_elements) {
                debug!("orbits {inner} and {outer} conflict");
                self.mark_cleared(inner_slot);
                self.mark_cleared(outer_slot);
                self.scratch.push(Command::Detonate { inner: *inner });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn is_cleared(&self, slot: usize) -> bool {
        self.cleared.get(slot).copied().unwrap_or(false)
    }

    fn mark_cleared(&mut self, slot: usize) {
        if let Some(flag) = self.cleared.get_mut(slot) {
            *flag = true;
        }
    }
}

fn slot(orbit: OrbitIndex) -> usize {
    usize::try_from(orbit.get()).unwrap_or(usize::MAX)
}
