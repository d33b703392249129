mod app;
mod ui;

use app::CsvFinderApp;
use clap::Parser;
use csv_finder::cli;
use csv_finder::settings::{JsonSettingsStore, MemorySettingsStore, SettingsStore};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let args = cli::Args::parse();

    let store: Box<dyn SettingsStore> = match JsonSettingsStore::new() {
        Some(store) => {
            log::debug!("Settings file: {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("No config directory found, settings will not be saved");
            Box::new(MemorySettingsStore::default())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "CSV Finder",
        options,
        Box::new(move |_cc| {
            let mut app = CsvFinderApp::new(store);
            if let Some(path) = &args.file {
                app.load_path(path, args.delimiter.map(Into::into));
            }
            Ok(Box::new(app))
        }),
    )
}
