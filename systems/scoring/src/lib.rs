#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives the player's score from orbit occupancy.

use planet_builder_core::{Event, OrbitView, Score};

/// Sums every orbit's element count weighted by its one-based index.
#[must_use]
pub fn score(orbits: OrbitView<'_>) -> Score {
    let total = orbits.iter().fold(0u32, |total, (orbit, elements)| {
        let count = u32::try_from(elements.len()).unwrap_or(u32::MAX);
        total.saturating_add(count.saturating_mul(orbit.weight()))
    });
    Score::new(total)
}

/// Scoring system that recomputes the score after placements and resets.
#[derive(Debug, Default)]
pub struct Scoring {
    current: Score,
}

impl Scoring {
    /// Creates a scoring system reporting zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Score::ZERO,
        }
    }

    /// Most recently derived score.
    #[must_use]
    pub const fn current(&self) -> Score {
        self.current
    }

    /// Recomputes the score when the events include a placement or reset.
    ///
    /// Returns the fresh score so adapters can display it, or `None` when no
    /// recomputation was due.
    pub fn handle(&mut self, events: &[Event], orbits: OrbitView<'_>) -> Option<Score> {
        let due = events
            .iter()
            .any(|event| matches!(event, Event::ElementPlaced { .. } | Event::SystemReset));
        if !due {
            return None;
        }

        Some(self.refresh(orbits))
    }

    /// Recomputes the score unconditionally.
    pub fn refresh(&mut self, orbits: OrbitView<'_>) -> Score {
        self.current = score(orbits);
        self.current
    }
}
