//! Planet-canvas and footer rendering for `PlanetsApp`.
//!
//! Drives the layout simulation (one tick per frame until it settles,
//! rebuilt whenever the viewport changes) and paints the planets with
//! the egui painter: glow and a slight scale-up for highlighted engines,
//! the monogram or name depending on hover, and a tooltip panel with the
//! localized description. A planet click opens either the engine's
//! search URL with the active query substituted, or its home page, in a
//! new browser tab.

use eframe::egui;

use search_planets::catalog::Engine;
use search_planets::i18n::{tr, UiText};
use search_planets::layout::{PlanetNode, Simulation};

use super::PlanetsApp;

const TOOLTIP_WIDTH: f32 = 200.0;
const TOOLTIP_GAP: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 10.0;
/// Highlighted planets render at this multiple of their layout radius.
const HIGHLIGHT_SCALE: f32 = 1.1;

impl PlanetsApp {
    /// Render the central planet canvas.
    pub fn draw_planets(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let rect = ui.available_rect_before_wrap();
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return;
        }
        let painter = ui.painter_at(rect);
        draw_star_field(&painter, rect);

        // Rebuild the simulation when the viewport changes; at most one
        // simulation runs per viewport.
        let stale = match &self.sim {
            None => true,
            Some(sim) => {
                let (w, h) = sim.viewport();
                (w - rect.width()).abs() > 1.0 || (h - rect.height()).abs() > 1.0
            }
        };
        if stale {
            self.sim = Some(Simulation::new(
                Engine::all(),
                self.session.lang(),
                rect.width(),
                rect.height(),
            ));
        }

        if let Some(sim) = self.sim.as_mut() {
            if sim.tick() {
                ctx.request_repaint();
            }
        }
        let Some(sim) = self.sim.as_ref() else {
            return;
        };

        let origin = rect.min.to_vec2();
        let mut open_url: Option<String> = None;
        let mut hovered: Option<usize> = None;

        for (i, node) in sim.nodes().iter().enumerate() {
            let center = egui::pos2(node.x, node.y) + origin;
            let highlighted = self.session.is_highlighted(node.engine.id);
            let radius = if highlighted {
                node.radius * HIGHLIGHT_SCALE
            } else {
                node.radius
            };

            let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0));
            let response = ui.interact(
                hit,
                egui::Id::new(("planet", node.engine.id)),
                egui::Sense::click(),
            );
            let is_hovered = response.hovered();
            if is_hovered {
                hovered = Some(i);
            }
            if response.clicked() {
                open_url = Some(self.session.click_url(&node.engine));
            }

            if highlighted {
                // White glow standing in for a drop-shadow.
                for ring in 1..=3 {
                    let alpha = 90 / ring;
                    painter.circle_stroke(
                        center,
                        radius + ring as f32 * 3.0,
                        egui::Stroke::new(
                            2.0,
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha as u8),
                        ),
                    );
                }
            }

            let [r, g, b] = node.engine.color;
            painter.circle_filled(center, radius, egui::Color32::from_rgb(r, g, b));
            painter.circle_stroke(
                center,
                radius,
                egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 40)),
            );

            if is_hovered {
                // Name replaces the monogram while hovered.
                let font = egui::FontId::proportional(14.0);
                painter.text(
                    center + egui::vec2(1.0, 1.0),
                    egui::Align2::CENTER_CENTER,
                    node.engine.name,
                    font.clone(),
                    egui::Color32::BLACK,
                );
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    node.engine.name,
                    font,
                    egui::Color32::WHITE,
                );
            } else {
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    node.engine.icon,
                    egui::FontId::proportional(radius),
                    egui::Color32::WHITE,
                );
            }
        }

        if let Some(i) = hovered {
            let label = tr(self.session.lang(), UiText::MonthlySearches);
            draw_tooltip(&painter, rect, &sim.nodes()[i], label);
        }

        // The only side effect visible outside the process.
        if let Some(url) = open_url {
            ctx.open_url(egui::OpenUrl::new_tab(url));
        }
    }

    /// Render the footer strip: thinking indicator, error banner, or the
    /// current recommendation list.
    pub fn draw_footer(&self, ui: &mut egui::Ui) {
        let lang = self.session.lang();

        if self.session.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    egui::RichText::new(tr(lang, UiText::Thinking))
                        .color(egui::Color32::from_rgb(209, 213, 219)),
                );
            });
            return;
        }

        if let Some(error) = self.session.error {
            ui.colored_label(egui::Color32::from_rgb(248, 113, 113), error);
            return;
        }

        if self.session.recommendations.is_empty() {
            return;
        }

        ui.label(
            egui::RichText::new(format!(
                "{} \"{}\"",
                tr(lang, UiText::RecommendationsFor),
                self.session.query
            ))
            .strong()
            .color(egui::Color32::from_rgb(103, 232, 249)),
        );
        ui.add_space(4.0);
        for rec in &self.session.recommendations {
            let name = Engine::by_id(&rec.engine_id)
                .map(|e| e.name)
                .unwrap_or(rec.engine_id.as_str());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(name).strong().color(egui::Color32::WHITE));
                ui.label(
                    egui::RichText::new(&rec.reason)
                        .color(egui::Color32::from_rgb(209, 213, 219)),
                );
            });
        }
    }
}

/// Tooltip panel beside a hovered planet: description, then the
/// monthly-searches label and figure. Placed left of the planet when it
/// sits in the right half of the viewport, and vice versa.
fn draw_tooltip(painter: &egui::Painter, rect: egui::Rect, node: &PlanetNode, monthly_label: &str) {
    let center = egui::pos2(node.x, node.y) + rect.min.to_vec2();
    let wrap = TOOLTIP_WIDTH - TOOLTIP_PADDING * 2.0;

    let description = painter.layout(
        node.description.to_string(),
        egui::FontId::proportional(12.0),
        egui::Color32::from_rgb(226, 232, 240),
        wrap,
    );
    let label = painter.layout(
        monthly_label.to_string(),
        egui::FontId::proportional(11.0),
        egui::Color32::from_rgb(156, 163, 175),
        wrap,
    );
    let figure = painter.layout(
        node.monthly_searches.to_string(),
        egui::FontId::proportional(13.0),
        egui::Color32::from_rgb(103, 232, 249),
        wrap,
    );

    let height = TOOLTIP_PADDING * 2.0
        + description.size().y
        + 8.0 // gap above the separator
        + 6.0
        + label.size().y
        + 2.0
        + figure.size().y;

    let x = if node.x > rect.width() / 2.0 {
        center.x - node.radius - TOOLTIP_GAP - TOOLTIP_WIDTH
    } else {
        center.x + node.radius + TOOLTIP_GAP
    };
    let y = (center.y - 50.0).clamp(rect.top() + 8.0, rect.bottom() - height - 8.0);
    let panel = egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(TOOLTIP_WIDTH, height));

    painter.rect(
        panel,
        8.0,
        egui::Color32::from_rgba_unmultiplied(30, 41, 59, 235),
        egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 30)),
    );

    let left = panel.left() + TOOLTIP_PADDING;
    let mut cursor = panel.top() + TOOLTIP_PADDING;
    painter.galley(
        egui::pos2(left, cursor),
        description.clone(),
        egui::Color32::WHITE,
    );
    cursor += description.size().y + 8.0;
    painter.line_segment(
        [
            egui::pos2(left, cursor),
            egui::pos2(panel.right() - TOOLTIP_PADDING, cursor),
        ],
        egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 30)),
    );
    cursor += 6.0;
    painter.galley(egui::pos2(left, cursor), label.clone(), egui::Color32::WHITE);
    cursor += label.size().y + 2.0;
    painter.galley(egui::pos2(left, cursor), figure, egui::Color32::WHITE);
}

/// Faint deterministic starfield behind the planets.
fn draw_star_field(painter: &egui::Painter, rect: egui::Rect) {
    let mut state: u32 = 0x9E37_79B9;
    let mut next = || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 16) as f32 / 65535.0
    };
    for _ in 0..140 {
        let x = rect.left() + next() * rect.width();
        let y = rect.top() + next() * rect.height();
        let twinkle = next();
        let alpha = (40.0 + twinkle * 110.0) as u8;
        let size = if twinkle > 0.9 { 1.2 } else { 0.7 };
        painter.circle_filled(
            egui::pos2(x, y),
            size,
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
        );
    }
}
