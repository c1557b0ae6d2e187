//! API key status card

use crate::api::{ApiKey, Source};
use crate::ui::state::ApiKeysStatus;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct ApiKeysDisplay<'a> {
    status: &'a ApiKeysStatus,
    theme: &'a Theme,
}

impl<'a> ApiKeysDisplay<'a> {
    pub fn new(status: &'a ApiKeysStatus, theme: &'a Theme) -> Self {
        Self { status, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.card)
            .rounding(self.theme.corner_radius)
            .inner_margin(self.theme.padding)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("API Keys")
                        .heading()
                        .color(self.theme.ink),
                );
                ui.add_space(self.theme.gap);

                match self.status {
                    ApiKeysStatus::Loading => {
                        let response = ui.label(
                            RichText::new("Loading...").color(self.theme.faint),
                        );
                        response.widget_info(|| {
                            egui::WidgetInfo::labeled(
                                egui::WidgetType::Label,
                                true,
                                "API keys loading",
                            )
                        });
                    }
                    ApiKeysStatus::Loaded(keys) => {
                        self.show_key(ui, "OpenAI", keys.openai.as_ref());
                    }
                }
            });
    }

    fn show_key(&self, ui: &mut egui::Ui, service: &str, key: Option<&ApiKey>) {
        let (status, color) = match key {
            Some(ApiKey {
                source: Source::Environment,
                ..
            }) => ("Active (from environment)", self.theme.active),
            None => ("Inactive", self.theme.faint),
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(service).color(self.theme.subtle));
            let response = ui.label(RichText::new(status).color(color));
            let label = format!("{} API key: {}", service, status);
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label)
            });
        });
    }
}
