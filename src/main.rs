mod app;
mod color;
mod config;
mod data;
mod links;
mod profile;
mod state;
mod ui;

use std::path::Path;

use app::CoffeeCompassApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load(Path::new(config::DEFAULT_CONFIG_PATH));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Coffee Compass",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the fetched avatar.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CoffeeCompassApp::new(config)))
        }),
    )
}
