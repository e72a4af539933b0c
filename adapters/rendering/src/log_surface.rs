//! Headless presentation surface that reports every operation through `log`.

use glam::Vec2;
use log::info;
use planet_builder_core::{ElementType, OrbitIndex, Score, EXPLOSION_GLYPH};
use std::time::Duration;

use crate::{EffectId, OrbitLayout, PresentationSurface, TokenId};

/// Surface without a window, used for scripted replays.
///
/// Tokens are counted rather than drawn. Explosions are announced with their
/// lifetime and never need removing because nothing is on screen.
#[derive(Debug)]
pub struct LogSurface {
    layout: OrbitLayout,
    next_token: u32,
    next_effect: u32,
    live_tokens: usize,
    score: Score,
}

impl LogSurface {
    /// Creates a surface whose zone widths follow `layout`.
    #[must_use]
    pub fn new(layout: OrbitLayout) -> Self {
        Self {
            layout,
            next_token: 0,
            next_effect: 0,
            live_tokens: 0,
            score: Score::ZERO,
        }
    }

    /// Number of tokens created and not yet removed.
    #[must_use]
    pub fn live_tokens(&self) -> usize {
        self.live_tokens
    }

    /// Last score pushed to the surface.
    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }
}

impl PresentationSurface for LogSurface {
    fn zone_width(&self, orbit: OrbitIndex) -> f32 {
        self.layout.zone_width(orbit)
    }

    fn spawn_token(&mut self, orbit: OrbitIndex, element: ElementType, offset: Vec2) -> TokenId {
        let id = TokenId::new(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.live_tokens = self.live_tokens.saturating_add(1);
        info!(
            "{} placed on orbit {orbit} at ({:.1}, {:.1})",
            element.glyph(),
            offset.x,
            offset.y
        );
        id
    }

    fn remove_token(&mut self, token: TokenId) {
        self.live_tokens = self.live_tokens.saturating_sub(1);
        info!("token {} removed", token.get());
    }

    fn spawn_explosion(&mut self, orbit: OrbitIndex, lifetime: Duration) -> EffectId {
        let id = EffectId::new(self.next_effect);
        self.next_effect = self.next_effect.wrapping_add(1);
        info!(
            "{EXPLOSION_GLYPH} on orbit {orbit} for {}ms",
            lifetime.as_millis()
        );
        id
    }

    fn display_score(&mut self, score: Score) {
        self.score = score;
        info!("score: {score}");
    }
}
