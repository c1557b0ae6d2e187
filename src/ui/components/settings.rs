//! Settings panel
//!
//! Every control reads its value from the store and hands changes to
//! [`AppState`]; the store only moves once the backend has answered.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub const VOLUME_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;
pub const ANIMATION_SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.1..=4.0;

pub struct SettingsPanel<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.card)
            .rounding(self.theme.corner_radius)
            .inner_margin(self.theme.padding)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Settings")
                        .heading()
                        .color(self.theme.ink),
                );
                ui.add_space(self.theme.gap);

                self.show_sound_settings(ui);
                ui.separator();
                self.show_animation_settings(ui);
            });
    }

    fn show_sound_settings(&self, ui: &mut egui::Ui) {
        let store = &self.state.store;

        let mut sound_on = store.sound_on.get();
        if ui.checkbox(&mut sound_on, "Sounds").changed() {
            self.state.toggle_sound(sound_on);
        }

        let mut volume = store.volume.get();
        let response = ui.add_enabled(
            sound_on,
            egui::Slider::new(&mut volume, VOLUME_RANGE).text("Volume"),
        );
        // Save once the drag ends rather than on every frame of it
        if response.drag_stopped() || (response.changed() && !response.dragged()) {
            self.state.set_volume(volume);
        }
    }

    fn show_animation_settings(&self, ui: &mut egui::Ui) {
        let store = &self.state.store;

        let mut animations_on = store.animations_on.get();
        if ui.checkbox(&mut animations_on, "Animations").changed() {
            self.state.set_animations_on(animations_on);
        }

        let mut unceasing = store.unceasing_animations.get();
        let response = ui.add_enabled(
            animations_on,
            egui::Checkbox::new(&mut unceasing, "Background animation"),
        );
        if response.changed() {
            self.state.set_unceasing_animations(unceasing);
        }

        let mut speed = store.animation_speed.get();
        let response = ui.add_enabled(
            animations_on,
            egui::Slider::new(&mut speed, ANIMATION_SPEED_RANGE).text("Animation speed"),
        );
        if response.drag_stopped() || (response.changed() && !response.dragged()) {
            self.state.set_animation_speed(speed);
        }

        if !animations_on {
            ui.label(
                RichText::new("Animations are disabled")
                    .small()
                    .color(self.theme.faint),
            );
        }
    }
}
