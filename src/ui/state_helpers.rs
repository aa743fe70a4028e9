//! Helper functions to set grouped GalleryState properties.
//!
//! Dialog visibility and content are always set together so the UI never
//! shows a dialog with stale text.

use crate::error::AppError;
use crate::permission::{Affordance, Permission, PermissionPrompt};
use crate::services::gallery_service::user_message;
use slint::ComponentHandle;

/// Shows the error dialog with `message`.
pub fn show_error(ui: &crate::AppWindow, message: &str) {
    let state = ui.global::<crate::GalleryState>();
    state.set_error_message(message.into());
    state.set_error_visible(true);
}

pub fn hide_error(ui: &crate::AppWindow) {
    ui.global::<crate::GalleryState>().set_error_visible(false);
}

/// Shows the permission dialog for `permission`, or closes it once granted.
pub fn show_permission_prompt(ui: &crate::AppWindow, permission: Permission) {
    let state = ui.global::<crate::GalleryState>();

    match PermissionPrompt::for_permission(permission) {
        Some(prompt) => {
            state.set_permission_message(prompt.message.into());
            state.set_can_request_permission(prompt.affordance == Affordance::Request);
            state.set_can_open_settings(prompt.affordance == Affordance::OpenSettings);
            state.set_permission_visible(true);
        }
        None => state.set_permission_visible(false),
    }
}

pub fn is_permission_prompt_visible(ui: &crate::AppWindow) -> bool {
    ui.global::<crate::GalleryState>().get_permission_visible()
}

/// Routes an error to the permission dialog, the error dialog, or the log.
pub fn report_error(ui: &crate::AppWindow, err: &AppError) {
    if let AppError::PermissionDenied(permission) = err {
        show_permission_prompt(ui, *permission);
        return;
    }

    if let Some(message) = user_message(err) {
        show_error(ui, &message);
    }
}
