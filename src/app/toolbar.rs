//! Header rendering for `PlanetsApp`.
//!
//! Draws the trending-topics strip, the title and subtitle, and the
//! search box. Submitting the box (or clicking a topic pill) pushes the
//! text through the session and kicks off a recommendation fetch.

use eframe::egui;

use search_planets::i18n::{tr, UiText};

use super::PlanetsApp;

impl PlanetsApp {
    /// Render the top header strip.
    pub fn draw_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.session.lang();

        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            self.draw_trending(ui, ctx);

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(tr(lang, UiText::Title))
                    .size(26.0)
                    .strong()
                    .color(egui::Color32::from_rgb(96, 165, 250)),
            );
            ui.label(
                egui::RichText::new(tr(lang, UiText::Subtitle))
                    .size(14.0)
                    .color(egui::Color32::from_rgb(156, 163, 175)),
            );
            ui.add_space(10.0);

            let width = ui.available_width().min(480.0);
            let response = ui.add_sized(
                [width, 30.0],
                egui::TextEdit::singleline(&mut self.query_input)
                    .hint_text(tr(lang, UiText::SearchPlaceholder)),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                let text = self.query_input.clone();
                if let Some(req) = self.session.submit_query(&text) {
                    self.start_query(ctx, req);
                }
            }
        });
        ui.add_space(10.0);
    }

    /// Trending pills, or shimmer placeholders while the mount-time
    /// fetch is still in flight. An empty list draws only the label.
    fn draw_trending(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let lang = self.session.lang();
        ui.label(
            egui::RichText::new(tr(lang, UiText::Trending))
                .size(13.0)
                .strong()
                .color(egui::Color32::from_rgb(209, 213, 219)),
        );
        ui.add_space(4.0);

        let mut clicked: Option<String> = None;
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 6.0;
            if self.session.topics_loading {
                for _ in 0..4 {
                    ui.add_enabled(
                        false,
                        egui::Button::new("          ").rounding(12.0),
                    );
                }
            } else {
                for topic in &self.session.trending {
                    let pill = egui::Button::new(
                        egui::RichText::new(topic)
                            .size(12.0)
                            .color(egui::Color32::from_rgb(229, 231, 235)),
                    )
                    .rounding(12.0)
                    .fill(egui::Color32::from_rgb(30, 41, 59));
                    if ui.add(pill).clicked() {
                        clicked = Some(topic.clone());
                    }
                }
            }
        });

        if let Some(topic) = clicked {
            self.query_input = topic.clone();
            if let Some(req) = self.session.click_topic(&topic) {
                self.start_query(ctx, req);
            }
        }
    }
}
