//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (add_item, refresh_list, remove_item, the
//! dialog buttons) and the focus hook re-checking gallery permission.

use crate::picker::GalleryPicker;
use crate::services::gallery_service::add_from_gallery;
use crate::state::AppState;
use crate::ui::{hide_error, is_permission_prompt_visible, report_error, show_permission_prompt};
use log::{debug, info};
use slint::ComponentHandle;

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: &AppState) {
    let logic = ui.global::<crate::Logic>();

    // Uses slint::spawn_local because AsyncFileDialog must run on the main thread.
    logic.on_add_item({
        let ui_handle = ui.as_weak();
        let gallery = state.gallery.clone();
        let picker = state.picker;
        move || {
            let ui_handle = ui_handle.clone();
            let gallery = gallery.clone();
            let _ = slint::spawn_local(async move {
                if let Err(e) = add_from_gallery(&*gallery, &picker).await {
                    if let Some(ui) = ui_handle.upgrade() {
                        report_error(&ui, &e);
                    }
                }
            });
        }
    });

    logic.on_refresh_list({
        let ui_handle = ui.as_weak();
        let gallery = state.gallery.clone();
        let picker = state.picker;
        move || {
            let result = gallery.borrow_mut().refresh(&picker);
            match result {
                Ok(report) => debug!("Refresh dropped {:?}", report.dropped),
                Err(e) => {
                    if let Some(ui) = ui_handle.upgrade() {
                        report_error(&ui, &e);
                    }
                }
            }
        }
    });

    logic.on_remove_item({
        let ui_handle = ui.as_weak();
        let gallery = state.gallery.clone();
        move |path| {
            let result = gallery.borrow_mut().remove(&path);
            if let Err(e) = result {
                if let Some(ui) = ui_handle.upgrade() {
                    report_error(&ui, &e);
                }
            }
        }
    });

    logic.on_dismiss_error({
        let ui_handle = ui.as_weak();
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                hide_error(&ui);
            }
        }
    });

    logic.on_request_permission({
        let ui_handle = ui.as_weak();
        let picker = state.picker;
        move || {
            let permission = picker.request_permission();
            if let Some(ui) = ui_handle.upgrade() {
                show_permission_prompt(&ui, permission);
            }
        }
    });

    logic.on_open_settings({
        let picker = state.picker;
        move || picker.open_settings()
    });

    setup_focus_hook(ui, state);
}

/// Re-checks permission whenever the window regains focus, e.g. after the
/// user returns from the system settings.
fn setup_focus_hook(ui: &crate::AppWindow, state: &AppState) {
    use i_slint_backend_winit::WinitWindowAccessor;
    use i_slint_backend_winit::{EventResult, winit::event::WindowEvent};

    let ui_handle = ui.as_weak();
    let picker = state.picker;

    ui.window().on_winit_window_event(move |_window, event| {
        if let WindowEvent::Focused(true) = event {
            if let Some(ui) = ui_handle.upgrade() {
                if is_permission_prompt_visible(&ui) {
                    let permission = picker.check_permission();
                    info!("Focus regained, files read permission: {}", permission);
                    show_permission_prompt(&ui, permission);
                }
            }
        }

        EventResult::Propagate
    });
}
