//! Colors and spacing for the ZAMM UI

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Vec2, Visuals};

#[derive(Clone, Debug)]
pub struct Theme {
    /// Window background behind every panel
    pub background: Color32,
    /// Settings and info cards
    pub card: Color32,
    pub card_raised: Color32,

    pub ink: Color32,
    pub subtle: Color32,
    pub faint: Color32,

    /// Switches that are on, keys that are present
    pub active: Color32,
    pub alert: Color32,

    pub corner_radius: Rounding,
    /// Inner padding of cards and panels
    pub padding: f32,
    /// Gap between rows inside a card
    pub gap: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark slate with a cyan accent
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(18, 20, 24),
            card: Color32::from_rgb(30, 33, 40),
            card_raised: Color32::from_rgb(46, 50, 60),

            ink: Color32::from_rgb(236, 238, 242),
            subtle: Color32::from_rgb(190, 194, 204),
            faint: Color32::from_rgb(128, 134, 148),

            active: Color32::from_rgb(38, 198, 218),
            alert: Color32::from_rgb(229, 83, 75),

            corner_radius: Rounding::same(8.0),
            padding: 14.0,
            gap: 6.0,
        }
    }

    /// Install visuals and text sizes on `ctx`
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();
        visuals.panel_fill = self.background;
        visuals.window_fill = self.card;
        visuals.extreme_bg_color = self.card_raised;
        visuals.window_rounding = self.corner_radius;

        // Checkbox ticks and slider handles take the accent
        let widgets = &mut visuals.widgets;
        widgets.inactive.bg_fill = self.card_raised;
        widgets.inactive.fg_stroke = Stroke::new(1.0, self.subtle);
        widgets.hovered.fg_stroke = Stroke::new(1.5, self.active);
        widgets.active.bg_fill = self.active.gamma_multiply(0.6);
        widgets.active.fg_stroke = Stroke::new(1.5, self.ink);
        visuals.selection.bg_fill = self.active.gamma_multiply(0.4);
        visuals.selection.stroke = Stroke::new(1.0, self.active);

        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style.spacing.item_spacing = Vec2::new(self.gap, self.gap);
            style.spacing.slider_width = 160.0;
            style
                .text_styles
                .insert(TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional));
            style
                .text_styles
                .insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
        });
    }
}
