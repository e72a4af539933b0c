#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Planet Builder adapters.
//!
//! Game logic never touches a window directly. It drives a
//! [`PresentationSurface`], which [`Scene`] implements for windowed backends
//! and [`LogSurface`] implements for headless runs.

mod log_surface;

pub use self::log_surface::LogSurface;

use anyhow::Result as AnyResult;
use glam::Vec2;
use planet_builder_core::{ElementType, GameConfig, OrbitIndex, Score};
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Fill color used for tokens carrying `element`.
#[must_use]
pub const fn element_color(element: ElementType) -> Color {
    match element {
        ElementType::Earth => Color::from_rgb_u8(0x2f, 0x95, 0x32),
        ElementType::Fire => Color::from_rgb_u8(0xe8, 0x5d, 0x25),
        ElementType::Water => Color::from_rgb_u8(0x2a, 0x7f, 0xd8),
    }
}

/// Identifier allocated by a surface to each visual token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    /// Creates a new token identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier allocated by a surface to each transient effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u32);

impl EffectId {
    /// Creates a new effect identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Computes where the `slot`-th token of an orbit sits relative to the zone centre.
///
/// Slots are one-based arrival positions. Tokens are spread evenly around the
/// ring, `360 / max_per_orbit` degrees apart starting at angle zero, on a
/// radius of half the zone's rendered width.
#[must_use]
pub fn token_offset(slot: u32, max_per_orbit: u32, zone_width: f32) -> Vec2 {
    let step_degrees = 360.0 / max_per_orbit.max(1) as f32;
    let angle = (slot.saturating_sub(1) as f32 * step_degrees).to_radians();
    let radius = zone_width / 2.0;
    Vec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Capabilities the game needs from whatever displays it.
pub trait PresentationSurface {
    /// Current rendered width of the orbit's drop zone.
    fn zone_width(&self, orbit: OrbitIndex) -> f32;

    /// Creates a token for `element` on `orbit`, translated by `offset` from the zone centre.
    fn spawn_token(&mut self, orbit: OrbitIndex, element: ElementType, offset: Vec2) -> TokenId;

    /// Removes a token previously created by [`spawn_token`](Self::spawn_token).
    fn remove_token(&mut self, token: TokenId);

    /// Shows an explosion anchored to `orbit` that removes itself after `lifetime`.
    fn spawn_explosion(&mut self, orbit: OrbitIndex, lifetime: Duration) -> EffectId;

    /// Displays the current score.
    fn display_score(&mut self, score: Score);
}

/// Concentric drop zones sharing a common centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLayout {
    /// Centre shared by every orbit, in scene units.
    pub center: Vec2,
    /// Radius of the innermost orbit's zone.
    pub inner_radius: f32,
    /// Radial distance between consecutive orbits.
    pub spacing: f32,
    /// Number of orbits laid out.
    pub orbit_count: u32,
}

impl OrbitLayout {
    /// Creates a new layout descriptor.
    ///
    /// Returns an error when the innermost radius or the spacing is not positive.
    pub fn new(
        center: Vec2,
        inner_radius: f32,
        spacing: f32,
        orbit_count: u32,
    ) -> Result<Self, RenderingError> {
        if inner_radius <= 0.0 || spacing <= 0.0 {
            return Err(RenderingError::InvalidOrbitGeometry {
                inner_radius,
                spacing,
            });
        }

        Ok(Self {
            center,
            inner_radius,
            spacing,
            orbit_count,
        })
    }

    /// Radius of the orbit's zone, or `None` when the orbit is not laid out.
    #[must_use]
    pub fn radius(&self, orbit: OrbitIndex) -> Option<f32> {
        if orbit.get() >= self.orbit_count {
            return None;
        }

        Some(self.inner_radius + orbit.get() as f32 * self.spacing)
    }

    /// Rendered width of the orbit's zone. Zero when the orbit is not laid out.
    #[must_use]
    pub fn zone_width(&self, orbit: OrbitIndex) -> f32 {
        self.radius(orbit).map_or(0.0, |radius| radius * 2.0)
    }

    /// Radius of the outermost zone.
    #[must_use]
    pub fn outer_radius(&self) -> f32 {
        self.orbit_count
            .checked_sub(1)
            .and_then(|last| self.radius(OrbitIndex::new(last)))
            .unwrap_or(0.0)
    }

    /// Iterator over every zone, innermost first.
    pub fn zones(&self) -> impl Iterator<Item = (OrbitIndex, f32)> + '_ {
        (0..self.orbit_count).filter_map(|index| {
            let orbit = OrbitIndex::new(index);
            self.radius(orbit).map(|radius| (orbit, radius))
        })
    }

    /// Returns the innermost zone whose disc contains `point`.
    ///
    /// Zones nest, so a point inside ring 0 also lies inside every outer ring;
    /// the innermost one is the drop target.
    #[must_use]
    pub fn hit_test(&self, point: Vec2) -> Option<OrbitIndex> {
        let distance = point.distance(self.center);
        self.zones()
            .find(|(_, radius)| distance <= *radius)
            .map(|(orbit, _)| orbit)
    }
}

/// Draggable palette entry that starts a gesture carrying an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteSource {
    /// Element carried by gestures started here.
    pub element: ElementType,
    /// Centre of the source in scene units.
    pub center: Vec2,
    /// Grab radius in scene units.
    pub radius: f32,
}

impl PaletteSource {
    /// Creates a new palette source.
    #[must_use]
    pub const fn new(element: ElementType, center: Vec2, radius: f32) -> Self {
        Self {
            element,
            center,
            radius,
        }
    }

    /// Reports whether `point` lies on the source.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance(self.center) <= self.radius
    }
}

/// Axis-aligned button used as the reset trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResetTrigger {
    /// Upper-left corner in scene units.
    pub origin: Vec2,
    /// Width and height in scene units.
    pub size: Vec2,
}

impl ResetTrigger {
    /// Creates a new reset trigger.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Reports whether `point` lies on the trigger.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x <= max.x && point.y <= max.y
    }
}

/// Token placed on an orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneToken {
    /// Identifier allocated by the scene.
    pub id: TokenId,
    /// Orbit the token belongs to.
    pub orbit: OrbitIndex,
    /// Element carried by the token.
    pub element: ElementType,
    /// Translation from the zone centre.
    pub offset: Vec2,
}

/// Explosion effect that disappears once its lifetime runs out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneExplosion {
    /// Identifier allocated by the scene.
    pub id: EffectId,
    /// Orbit the explosion is anchored to.
    pub orbit: OrbitIndex,
    /// Time left before the effect is removed.
    pub remaining: Duration,
}

/// Scene description combining drop zones, palette, tokens and effects.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Width of the scene canvas in scene units.
    pub width: f32,
    /// Height of the scene canvas in scene units.
    pub height: f32,
    /// Concentric orbit drop zones.
    pub layout: OrbitLayout,
    /// Draggable element sources.
    pub palette: Vec<PaletteSource>,
    /// Button that resets the system.
    pub reset: ResetTrigger,
    /// Tokens currently placed on orbits.
    pub tokens: Vec<SceneToken>,
    /// Explosions currently visible.
    pub explosions: Vec<SceneExplosion>,
    /// Score shown in the side panel.
    pub score: Score,
    /// Element following the pointer while a drag gesture is in flight.
    pub dragged: Option<ElementType>,
    next_token: u32,
    next_effect: u32,
}

impl Scene {
    /// Canvas width of the default layout.
    pub const DEFAULT_WIDTH: f32 = 800.0;

    /// Canvas height of the default layout.
    pub const DEFAULT_HEIGHT: f32 = 560.0;

    /// Radius of every palette source.
    pub const PALETTE_RADIUS: f32 = 28.0;

    /// Creates an empty scene with the provided layout pieces.
    #[must_use]
    pub fn new(
        width: f32,
        height: f32,
        layout: OrbitLayout,
        palette: Vec<PaletteSource>,
        reset: ResetTrigger,
    ) -> Self {
        Self {
            width,
            height,
            layout,
            palette,
            reset,
            tokens: Vec::new(),
            explosions: Vec::new(),
            score: Score::ZERO,
            dragged: None,
            next_token: 0,
            next_effect: 0,
        }
    }

    /// Creates the default scene for the provided configuration.
    ///
    /// Orbits are centred on the right of the canvas, the palette is stacked
    /// on the left with the reset button below it.
    pub fn for_config(config: &GameConfig) -> Result<Self, RenderingError> {
        let orbit_count = config.orbit_count();
        let center = Vec2::new(Self::DEFAULT_WIDTH * 0.6, Self::DEFAULT_HEIGHT * 0.5);
        let available = Self::DEFAULT_HEIGHT * 0.5 - 24.0;
        let spacing = available / (orbit_count as f32 + 0.5);
        let layout = OrbitLayout::new(center, spacing * 1.5, spacing, orbit_count)?;

        let palette = ElementType::ALL
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                PaletteSource::new(
                    element,
                    Vec2::new(80.0, 100.0 + index as f32 * 90.0),
                    Self::PALETTE_RADIUS,
                )
            })
            .collect();
        let reset = ResetTrigger::new(Vec2::new(30.0, 400.0), Vec2::new(100.0, 40.0));

        Ok(Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            layout,
            palette,
            reset,
        ))
    }

    /// Palette source under `point`, if any.
    #[must_use]
    pub fn palette_at(&self, point: Vec2) -> Option<PaletteSource> {
        self.palette
            .iter()
            .copied()
            .find(|source| source.contains(point))
    }

    /// Absolute scene position of a token.
    #[must_use]
    pub fn token_position(&self, token: &SceneToken) -> Vec2 {
        self.layout.center + token.offset
    }

    /// Advances effect timers by `dt`, dropping explosions whose lifetime ran out.
    pub fn advance(&mut self, dt: Duration) {
        for explosion in &mut self.explosions {
            explosion.remaining = explosion.remaining.saturating_sub(dt);
        }
        self.explosions
            .retain(|explosion| !explosion.remaining.is_zero());
    }
}

impl PresentationSurface for Scene {
    fn zone_width(&self, orbit: OrbitIndex) -> f32 {
        self.layout.zone_width(orbit)
    }

    fn spawn_token(&mut self, orbit: OrbitIndex, element: ElementType, offset: Vec2) -> TokenId {
        let id = TokenId::new(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.tokens.push(SceneToken {
            id,
            orbit,
            element,
            offset,
        });
        id
    }

    fn remove_token(&mut self, token: TokenId) {
        self.tokens.retain(|candidate| candidate.id != token);
    }

    fn spawn_explosion(&mut self, orbit: OrbitIndex, lifetime: Duration) -> EffectId {
        let id = EffectId::new(self.next_effect);
        self.next_effect = self.next_effect.wrapping_add(1);
        self.explosions.push(SceneExplosion {
            id,
            orbit,
            remaining: lifetime,
        });
        id
    }

    fn display_score(&mut self, score: Score) {
        self.score = score;
    }
}

/// Pointer snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position expressed in scene units, when it lies over the window.
    pub pointer: Option<Vec2>,
    /// Whether the primary button went down on this frame.
    pub pressed: bool,
    /// Whether the primary button was released on this frame.
    pub released: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Planet Builder scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame pointer input, and may mutate the scene before it is
    /// rendered. Explosion timers are advanced by the backend after the
    /// closure returns.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Orbit rings need a positive radius and spacing to be drawn and hit-tested.
    #[error("orbit geometry must be positive (inner radius {inner_radius}, spacing {spacing})")]
    InvalidOrbitGeometry {
        /// Provided innermost radius.
        inner_radius: f32,
        /// Provided spacing between rings.
        spacing: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec2_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn layout() -> OrbitLayout {
        OrbitLayout::new(Vec2::new(100.0, 100.0), 20.0, 10.0, 4).expect("valid layout")
    }

    #[test]
    fn token_offsets_follow_arrival_angle() {
        assert_vec2_close(token_offset(1, 3, 100.0), Vec2::new(50.0, 0.0));
        assert_vec2_close(
            token_offset(2, 3, 100.0),
            Vec2::new(50.0 * 120f32.to_radians().cos(), 50.0 * 120f32.to_radians().sin()),
        );
        assert_vec2_close(
            token_offset(3, 3, 100.0),
            Vec2::new(50.0 * 240f32.to_radians().cos(), 50.0 * 240f32.to_radians().sin()),
        );
    }

    #[test]
    fn layout_rejects_non_positive_geometry() {
        let error = OrbitLayout::new(Vec2::ZERO, 0.0, 10.0, 4)
            .expect_err("zero radius must be rejected");

        assert!(matches!(
            error,
            RenderingError::InvalidOrbitGeometry { spacing, .. } if spacing == 10.0
        ));
    }

    #[test]
    fn zone_width_is_twice_the_ring_radius() {
        let layout = layout();

        assert_eq!(layout.zone_width(OrbitIndex::new(0)), 40.0);
        assert_eq!(layout.zone_width(OrbitIndex::new(3)), 100.0);
        assert_eq!(layout.zone_width(OrbitIndex::new(4)), 0.0);
        assert_eq!(layout.outer_radius(), 50.0);
    }

    #[test]
    fn hit_test_picks_innermost_containing_zone() {
        let layout = layout();

        assert_eq!(
            layout.hit_test(Vec2::new(105.0, 100.0)),
            Some(OrbitIndex::new(0))
        );
        assert_eq!(
            layout.hit_test(Vec2::new(100.0, 125.0)),
            Some(OrbitIndex::new(1))
        );
        assert_eq!(
            layout.hit_test(Vec2::new(100.0, 149.0)),
            Some(OrbitIndex::new(3))
        );
        assert_eq!(layout.hit_test(Vec2::new(100.0, 151.0)), None);
    }

    #[test]
    fn scene_surface_tracks_tokens_and_score() {
        let mut scene = Scene::for_config(&GameConfig::default()).expect("default layout");
        let first = scene.spawn_token(OrbitIndex::new(0), ElementType::Fire, Vec2::X);
        let second = scene.spawn_token(OrbitIndex::new(1), ElementType::Water, Vec2::Y);
        scene.remove_token(first);
        scene.display_score(Score::new(2));

        assert_ne!(first, second);
        assert_eq!(scene.tokens.len(), 1);
        assert_eq!(scene.tokens[0].id, second);
        assert_eq!(scene.score, Score::new(2));
    }

    #[test]
    fn explosions_expire_after_their_lifetime() {
        let mut scene = Scene::for_config(&GameConfig::default()).expect("default layout");
        let _ = scene.spawn_explosion(OrbitIndex::new(0), Duration::from_millis(1000));

        scene.advance(Duration::from_millis(600));
        assert_eq!(scene.explosions.len(), 1);
        assert_eq!(scene.explosions[0].remaining, Duration::from_millis(400));

        scene.advance(Duration::from_millis(400));
        assert!(scene.explosions.is_empty());
    }

    #[test]
    fn default_scene_exposes_palette_and_reset_trigger() {
        let scene = Scene::for_config(&GameConfig::default()).expect("default layout");

        assert_eq!(scene.palette.len(), 3);
        let fire = scene.palette[1];
        assert_eq!(scene.palette_at(fire.center), Some(fire));
        assert!(scene.palette_at(Vec2::new(-50.0, -50.0)).is_none());
        assert!(scene.reset.contains(Vec2::new(40.0, 410.0)));
        assert!(scene.layout.outer_radius() < scene.height * 0.5);
        assert!(scene.layout.center.x - scene.layout.outer_radius() > 80.0 + Scene::PALETTE_RADIUS);
    }
}
