use eframe::egui;

use search_planets::i18n::Lang;

mod app;

use app::PlanetsApp;

fn main() {
    env_logger::init();

    // Language is resolved once here and threaded explicitly into the
    // session; the layout engine is language-agnostic.
    let lang = Lang::detect();
    log::info!("ui language: {}", lang.tag());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Search Planets — AI Engine Recommender",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(PlanetsApp::new(lang)))
        }),
    )
    .expect("Failed to start Search Planets");
}
