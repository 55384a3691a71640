// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use catalog_sync::{
    config::{consts::STORE_DIR, SyncOptions},
    gui,
};
use eframe::egui::ViewportBuilder;

fn main() {
    let sync = SyncOptions::default();
    if !sync.documents.primary.exists() {
        eprintln!("{} not found next to this program.", sync.documents.primary.display());
        std::process::exit(1);
    }

    let _guard = match catalog_sync::log::init(STORE_DIR) {
        Ok(g) => Some(g),
        Err(e) => {
            eprintln!("Logging disabled: {e}");
            None
        }
    };

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([520.0, 620.0]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, sync) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
