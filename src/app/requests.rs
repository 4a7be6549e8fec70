//! Background Gemini fetches for `PlanetsApp`.
//!
//! Both remote calls run on worker threads and report back over mpsc
//! channels polled once per frame (`check_responses`). Starting a new
//! recommendation fetch replaces the previous channel, so an older
//! in-flight response is dropped on arrival; the session's sequence
//! number guards the same race a second time.

use std::sync::mpsc;
use std::sync::Arc;

use eframe::egui;

use search_planets::catalog::Engine;
use search_planets::net::GeminiError;
use search_planets::session::QueryRequest;

use super::PlanetsApp;

impl PlanetsApp {
    /// Start an async recommendation fetch for `req`. Without a client
    /// the request fails immediately through the normal error path.
    pub fn start_query(&mut self, ctx: &egui::Context, req: QueryRequest) {
        let Some(client) = self.gemini.as_ref().map(Arc::clone) else {
            self.session
                .apply_recommendations(req.seq, Err(GeminiError::MissingApiKey));
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.recommend_rx = Some(rx);

        let lang = self.session.lang();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = client.suggest_engines(&req.query, Engine::all(), lang);
            let _ = tx.send((req.seq, result));
            ctx.request_repaint();
        });
    }

    /// Start the mount-time trending-topics fetch. A missing client
    /// degrades to an empty topic list, same as any other failure.
    pub fn start_trending(&mut self, ctx: &egui::Context) {
        let Some(client) = self.gemini.as_ref().map(Arc::clone) else {
            self.session.apply_topics(Err(GeminiError::MissingApiKey));
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.topics_rx = Some(rx);

        let lang = self.session.lang();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = client.trending_topics(lang);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll both fetch channels and feed arrivals into the session.
    pub fn check_responses(&mut self) {
        if let Some(rx) = &self.recommend_rx {
            if let Ok((seq, result)) = rx.try_recv() {
                self.session.apply_recommendations(seq, result);
                self.recommend_rx = None;
            }
        }
        if let Some(rx) = &self.topics_rx {
            if let Ok(result) = rx.try_recv() {
                self.session.apply_topics(result);
                self.topics_rx = None;
            }
        }
    }
}
