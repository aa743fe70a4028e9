//! Access to the platform image gallery.

use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use crate::permission::Permission;
use log::{debug, info};
use rfd::AsyncFileDialog;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Why picking an image produced no path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickError {
    #[error("No file selected")]
    Cancelled,
    #[error("{0}")]
    System(String),
}

/// Gallery picker together with its read-permission model.
pub trait GalleryPicker {
    fn check_permission(&self) -> Permission;
    fn request_permission(&self) -> Permission;
    fn open_settings(&self);

    /// Lets the user choose one image. Resolves once the picker closes.
    fn pick_image(&self) -> impl Future<Output = Result<PathBuf, PickError>>;
}

/// Desktop picker built on the native file dialog.
///
/// Desktop platforms have no gallery permission, so access is always granted.
#[derive(Debug, Default, Clone, Copy)]
pub struct RfdPicker;

impl GalleryPicker for RfdPicker {
    fn check_permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn open_settings(&self) {
        info!("No permission settings to open on this platform");
    }

    async fn pick_image(&self) -> Result<PathBuf, PickError> {
        // AsyncFileDialog has to run on the main thread.
        let file_handle = AsyncFileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", &SUPPORTED_IMAGE_EXTENSIONS)
            .pick_file()
            .await
            .ok_or(PickError::Cancelled)?;

        let path = file_handle.path().to_path_buf();
        debug!("Image path: {}", path.display());
        Ok(path)
    }
}
