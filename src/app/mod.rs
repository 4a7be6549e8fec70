//! `PlanetsApp` — the top-level egui application state.
//!
//! This module declares the `PlanetsApp` struct and its `eframe::App`
//! impl. All methods are split across the sibling sub-modules:
//!
//! - `requests` — background Gemini fetches over mpsc channels
//! - `toolbar`  — title, trending strip, and the search box
//! - `content`  — the planet canvas and the recommendations footer

pub mod content;
pub mod requests;
pub mod toolbar;

use std::sync::{mpsc, Arc};

use eframe::egui;

use search_planets::i18n::Lang;
use search_planets::layout::Simulation;
use search_planets::net::{GeminiClient, GeminiError, Recommendation};
use search_planets::session::Session;

// ─── Application state ───────────────────────────────────────────────────────

pub struct PlanetsApp {
    pub session: Session,
    /// Text bound to the search box; committed into the session on Enter.
    pub query_input: String,
    /// Running layout simulation, rebuilt when the viewport changes.
    pub sim: Option<Simulation>,
    /// None when `GEMINI_API_KEY` is absent; fetches then fail locally.
    pub gemini: Option<Arc<GeminiClient>>,
    pub recommend_rx: Option<mpsc::Receiver<(u64, Result<Vec<Recommendation>, GeminiError>)>>,
    pub topics_rx: Option<mpsc::Receiver<Result<Vec<String>, GeminiError>>>,
    /// The mount-time trending fetch fires exactly once.
    pub topics_requested: bool,
}

impl PlanetsApp {
    pub fn new(lang: Lang) -> Self {
        let gemini = match GeminiClient::from_env() {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                log::warn!("Gemini client unavailable: {e}");
                None
            }
        };

        Self {
            session: Session::new(lang, search_planets::catalog::Engine::all()),
            query_input: String::new(),
            sim: None,
            gemini,
            recommend_rx: None,
            topics_rx: None,
            topics_requested: false,
        }
    }
}

impl eframe::App for PlanetsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.topics_requested {
            self.topics_requested = true;
            self.start_trending(ctx);
        }
        self.check_responses();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(11, 16, 32)))
            .show(ctx, |ui| {
                self.draw_header(ui, ctx);
            });

        egui::TopBottomPanel::bottom("footer")
            .frame(
                egui::Frame::none()
                    .fill(egui::Color32::from_rgb(11, 16, 32))
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                self.draw_footer(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(8, 12, 24)))
            .show(ctx, |ui| {
                self.draw_planets(ui, ctx);
            });
    }
}
