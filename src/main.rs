mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod timeline;
mod ui;

use app::HomeExchangeApp;
use config::ViewerConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::load_or_default();
    log::info!("Starting with date policy {:?}", config.date_policy);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HomeExchange Request Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(HomeExchangeApp::new(AppState::new(config))))),
    )
}
