//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter can
//! remain agnostic of Macroquad's UI types.

use macroquad::{
    color::{Color, WHITE},
    math::{RectOffset, Vec2},
    ui::{hash, Ui},
};
use planet_builder_core::Score;

/// Snapshot of the score panel's layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScorePanelContext {
    /// Top-left corner of the panel in screen coordinates.
    pub(crate) origin: Vec2,
    /// Panel dimensions in screen space.
    pub(crate) size: Vec2,
    /// Background colour applied to the window skin so the panel blends with
    /// the cleared frame.
    pub(crate) background: Color,
    /// Score most recently pushed to the scene.
    pub(crate) score: Score,
}

/// Renders the score label and the key hints.
pub(crate) fn draw_score_panel(ui: &mut Ui, context: ScorePanelContext) {
    let mut skin = ui.default_skin();
    skin.margin = 0.0;

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .color_inactive(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(8.0, 8.0, 8.0, 8.0))
        .build();
    skin.window_style = window_style;

    let label_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .margin(RectOffset::new(0.0, 0.0, 4.0, 4.0))
        .build();
    skin.label_style = label_style;

    ui.push_skin(&skin);

    let _ = ui.window(hash!("score_panel"), context.origin, context.size, |ui| {
        let score_text = format!("Score: {}", context.score);
        ui.label(None, score_text.as_str());
        ui.label(None, "Esc or Q quits.");
    });

    ui.pop_skin();
}
