// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod error;
mod file_utils;
mod gallery;
mod image_loader;
mod image_record;
mod permission;
mod picker;
mod services;
mod state;
mod storage;
mod ticker;
mod ui;

use slint::{ComponentHandle, ModelRc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    #[cfg(not(debug_assertions))]
    env_logger::init();

    let app = AppWindow::new()?;
    let store = storage::PathListStore::default_location();
    log::info!("Saved gallery lives in {}", store.base().display());

    let app_state = state::AppState::new(store);
    app.global::<GalleryState>()
        .set_items(ModelRc::from(app_state.items.clone()));

    // Setup all UI event handlers
    ui::setup_handlers(&app, &app_state);

    let restored = app_state.gallery.borrow_mut().init(&app_state.picker);
    match restored {
        Ok(report) => {
            if let Some(e) = report.save_error {
                ui::report_error(&app, &e);
            }
        }
        Err(e) => ui::report_error(&app, &e),
    }
    app_state.start_ticker();

    app.run()?;

    Ok(())
}
