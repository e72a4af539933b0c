#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Planet Builder.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The dependency is therefore declared without its default `audio` feature.
//!
//! The score panel uses Macroquad's immediate-mode UI module. All UI-specific
//! calls live inside the local `ui` module.

mod ui;

use self::ui::{draw_score_panel, ScorePanelContext};
use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::{
    color::{BLACK, WHITE},
    input::{
        is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
        KeyCode, MouseButton,
    },
};
use planet_builder_core::ElementType;
use planet_builder_rendering::{
    element_color, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use std::time::Duration;

const ZONE_COLOR: Color = Color::new(0.75, 0.78, 0.9, 0.35);
const ZONE_HIGHLIGHT_COLOR: Color = Color::new(0.95, 0.9, 0.5, 0.8);
const RESET_COLOR: Color = Color::new(0.3, 0.3, 0.35, 1.0);
const EXPLOSION_COLOR: Color = Color::new(1.0, 0.55, 0.1, 0.85);
const TOKEN_RADIUS: f32 = 16.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self { swap_interval } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 960,
            window_height: 672,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    info!("quit requested");
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let frame_input = gather_frame_input(&metrics, screen_width, screen_height);

                update_scene(frame_dt, frame_input, &mut scene);
                scene.advance(frame_dt);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let hovered = frame_input
                    .pointer
                    .filter(|_| scene.dragged.is_some())
                    .and_then(|pointer| scene.layout.hit_test(pointer));

                draw_zones(&scene, &metrics, hovered.map(|orbit| orbit.get()));
                draw_explosions(&scene, &metrics);
                draw_tokens(&scene, &metrics);
                draw_palette(&scene, &metrics);
                draw_reset_trigger(&scene, &metrics);
                if let (Some(element), Some(pointer)) = (scene.dragged, frame_input.pointer) {
                    draw_element(element, metrics.to_screen(pointer), TOKEN_RADIUS * metrics.scale);
                }

                let mut root_ui = macroquad::ui::root_ui();
                draw_score_panel(
                    &mut root_ui,
                    ScorePanelContext {
                        origin: to_macroquad_vec2(metrics.to_screen(Vec2::new(20.0, 460.0))),
                        size: MacroquadVec2::new(150.0 * metrics.scale, 70.0 * metrics.scale),
                        background,
                        score: scene.score,
                    },
                );

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Uniform scale and offset that fit the scene canvas into the window.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset: Vec2,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let scale = if scene.width <= f32::EPSILON || scene.height <= f32::EPSILON {
            1.0
        } else {
            (screen_width / scene.width).min(screen_height / scene.height)
        };

        let offset = Vec2::new(
            ((screen_width - scene.width * scale) * 0.5).max(0.0),
            ((screen_height - scene.height * scale) * 0.5).max(0.0),
        );

        Self { scale, offset }
    }

    fn to_screen(&self, point: Vec2) -> Vec2 {
        self.offset + point * self.scale
    }

    fn to_scene(&self, point: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }

        Some((point - self.offset) / self.scale)
    }
}

fn gather_frame_input(metrics: &SceneMetrics, screen_width: f32, screen_height: f32) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    gather_frame_input_from_observations(
        metrics,
        Vec2::new(cursor_x, cursor_y),
        Vec2::new(screen_width, screen_height),
        is_mouse_button_pressed(MouseButton::Left),
        is_mouse_button_released(MouseButton::Left),
    )
}

fn gather_frame_input_from_observations(
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    screen_size: Vec2,
    pressed: bool,
    released: bool,
) -> FrameInput {
    let inside_window = cursor_position.x >= 0.0
        && cursor_position.y >= 0.0
        && cursor_position.x <= screen_size.x
        && cursor_position.y <= screen_size.y;

    let pointer = if inside_window {
        metrics.to_scene(cursor_position)
    } else {
        None
    };

    FrameInput {
        pointer,
        pressed,
        released,
    }
}

fn draw_zones(scene: &Scene, metrics: &SceneMetrics, hovered: Option<u32>) {
    let center = metrics.to_screen(scene.layout.center);
    for (orbit, radius) in scene.layout.zones() {
        let color = if hovered == Some(orbit.get()) {
            ZONE_HIGHLIGHT_COLOR
        } else {
            ZONE_COLOR
        };
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius * metrics.scale,
            2.0,
            to_macroquad_color(color),
        );
    }
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        scene.layout.inner_radius * 0.3 * metrics.scale,
        to_macroquad_color(Color::from_rgb_u8(0xff, 0xd5, 0x4f)),
    );
}

fn draw_tokens(scene: &Scene, metrics: &SceneMetrics) {
    for token in &scene.tokens {
        let position = metrics.to_screen(scene.token_position(token));
        draw_element(token.element, position, TOKEN_RADIUS * metrics.scale);
    }
}

fn draw_palette(scene: &Scene, metrics: &SceneMetrics) {
    for source in &scene.palette {
        let position = metrics.to_screen(source.center);
        draw_element(source.element, position, source.radius * metrics.scale);
    }
}

fn draw_explosions(scene: &Scene, metrics: &SceneMetrics) {
    let center = metrics.to_screen(scene.layout.center);
    for explosion in &scene.explosions {
        let Some(radius) = scene.layout.radius(explosion.orbit) else {
            continue;
        };
        let fade = explosion.remaining.as_secs_f32().clamp(0.0, 1.0);
        let mut color = EXPLOSION_COLOR;
        color.alpha *= fade;
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius * metrics.scale,
            scene.layout.spacing * 0.5 * metrics.scale,
            to_macroquad_color(color),
        );
    }
}

fn draw_reset_trigger(scene: &Scene, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(scene.reset.origin);
    let size = scene.reset.size * metrics.scale;
    macroquad::shapes::draw_rectangle(origin.x, origin.y, size.x, size.y, to_macroquad_color(RESET_COLOR));
    macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, size.x, size.y, 2.0, BLACK);
    draw_label(
        "Reset",
        Vec2::new(origin.x + size.x * 0.22, origin.y + size.y * 0.65),
        22.0 * metrics.scale,
    );
}

fn draw_element(element: ElementType, position: Vec2, radius: f32) {
    let fill = element_color(element);
    macroquad::shapes::draw_circle(position.x, position.y, radius, to_macroquad_color(fill));
    macroquad::shapes::draw_circle_lines(
        position.x,
        position.y,
        radius,
        1.5,
        to_macroquad_color(fill.lighten(0.5)),
    );
    draw_label(
        element_initial(element),
        Vec2::new(position.x - radius * 0.35, position.y + radius * 0.4),
        radius * 1.2,
    );
}

fn element_initial(element: ElementType) -> &'static str {
    match element {
        ElementType::Earth => "E",
        ElementType::Fire => "F",
        ElementType::Water => "W",
    }
}

fn draw_label(text: &str, position: Vec2, font_size: f32) {
    let _ = macroquad::text::draw_text(text, position.x, position.y, font_size, WHITE);
}

fn to_macroquad_vec2(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planet_builder_core::GameConfig;

    fn base_scene() -> Scene {
        Scene::for_config(&GameConfig::default()).expect("default layout")
    }

    #[test]
    fn scene_metrics_preserve_aspect_ratio() {
        let scene = base_scene();
        let metrics = SceneMetrics::from_scene(&scene, 1600.0, 560.0);

        assert!((metrics.scale - 1.0).abs() <= f32::EPSILON);
        assert!((metrics.offset.x - 400.0).abs() <= f32::EPSILON);
        assert!(metrics.offset.y.abs() <= f32::EPSILON);
    }

    #[test]
    fn screen_and_scene_coordinates_round_trip() {
        let scene = base_scene();
        let metrics = SceneMetrics::from_scene(&scene, 960.0, 672.0);
        let point = Vec2::new(123.0, 456.0);

        let restored = metrics
            .to_scene(metrics.to_screen(point))
            .expect("positive scale");

        assert!((restored - point).length() < 1e-3);
    }

    #[test]
    fn pointer_outside_window_is_not_reported() {
        let scene = base_scene();
        let metrics = SceneMetrics::from_scene(&scene, 960.0, 672.0);

        let outside = gather_frame_input_from_observations(
            &metrics,
            Vec2::new(-5.0, 40.0),
            Vec2::new(960.0, 672.0),
            false,
            true,
        );
        assert!(outside.pointer.is_none());
        assert!(outside.released);

        let inside = gather_frame_input_from_observations(
            &metrics,
            metrics.to_screen(scene.layout.center),
            Vec2::new(960.0, 672.0),
            true,
            false,
        );
        let pointer = inside.pointer.expect("pointer inside window");
        assert!((pointer - scene.layout.center).length() < 1e-3);
        assert!(inside.pressed);
    }

    #[test]
    fn element_initials_are_distinct() {
        let initials: Vec<&str> = ElementType::ALL.into_iter().map(element_initial).collect();
        assert_eq!(initials, vec!["E", "F", "W"]);
    }
}
