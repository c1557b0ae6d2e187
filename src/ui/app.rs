//! Main application struct and eframe integration
//!
//! This module contains the main ZammApp that implements eframe::App.

use crate::ui::components::{ApiKeysDisplay, SettingsPanel};
use crate::ui::layout::{self, ANIMATIONS_DISABLED_CLASS};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use tracing::info;

/// Main ZAMM application
pub struct ZammApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Whether the app has been initialized
    initialized: bool,
}

impl ZammApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        let app = Self::from_state(state);
        app.theme.apply(&cc.egui_ctx);
        app
    }

    /// Build the app without touching any egui context
    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            theme: Theme::dark(),
            initialized: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Draw one frame and resolve the invocations it dispatched
    pub fn show(&mut self, ctx: &egui::Context) {
        self.initialize();

        self.apply_layout(ctx);
        self.show_header(ctx);
        self.show_error_bar(ctx);
        self.show_settings(ctx);
        self.show_content(ctx);

        if self.state.run_pending() {
            ctx.request_repaint();
        }
    }

    /// Sync preferences and fetch dashboard data (called on first frame)
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.state.mount();
        self.state.load_api_keys();
        self.initialized = true;
        info!("ZAMM UI initialized");
    }

    /// Carry the root attributes over to egui's animation timing
    fn apply_layout(&self, ctx: &egui::Context) {
        let animation_time = layout::animation_time(&self.state.store);
        ctx.style_mut(|style| style.animation_time = animation_time);
    }

    fn show_header(&self, ctx: &egui::Context) {
        let attrs = self.state.root_attributes();
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.card)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("ZAMM")
                            .size(20.0)
                            .strong()
                            .color(self.theme.ink),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if attrs.has_class(ANIMATIONS_DISABLED_CLASS) {
                            ui.label(
                                RichText::new("animations off")
                                    .small()
                                    .color(self.theme.faint),
                            );
                        }
                        if let Some(style) = &attrs.style {
                            ui.label(
                                RichText::new(style)
                                    .small()
                                    .monospace()
                                    .color(self.theme.faint),
                            );
                        }
                    });
                });
            });
    }

    fn show_error_bar(&self, ctx: &egui::Context) {
        let Some(error) = self.state.last_error.get() else {
            return;
        };
        TopBottomPanel::bottom("error_bar")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.card_raised)
                    .inner_margin(8.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(error.user_message()).color(self.theme.alert));
                    // Unrecoverable errors stay up until restart
                    if error.is_recoverable() && ui.button("Dismiss").clicked() {
                        self.state.last_error.set(None);
                    }
                });
            });
    }

    fn show_settings(&self, ctx: &egui::Context) {
        SidePanel::left("settings")
            .resizable(false)
            .default_width(280.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.background)
                    .inner_margin(self.theme.padding),
            )
            .show(ctx, |ui| {
                SettingsPanel::new(&self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.background)
                    .inner_margin(self.theme.padding),
            )
            .show(ctx, |ui| {
                let status = self.state.api_keys.get();
                ApiKeysDisplay::new(&status, &self.theme).show(ui);
            });
    }
}

impl eframe::App for ZammApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("ZAMM shutting down");
    }
}
