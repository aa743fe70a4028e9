//! Service for handling gallery user actions.
//!
//! Coordinates the permission model, the picker and the reconciler so the UI
//! handlers only deal with outcomes.

use crate::error::{AppError, Result};
use crate::gallery::{GalleryReconciler, InitReport, Presenter, RefreshReport, Upsert};
use crate::image_loader::{ImageDecoder, RgbaDecoder};
use crate::permission::Permission;
use crate::picker::{GalleryPicker, PickError};
use crate::storage::PathListRepository;
use log::{error, info, warn};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Asks for read access, failing with the resulting state when it is refused.
pub fn ensure_permission<G: GalleryPicker>(picker: &G) -> Result<()> {
    match picker.request_permission() {
        Permission::Granted => Ok(()),
        other => {
            warn!("Gallery read permission not granted: {}", other);
            Err(AppError::PermissionDenied(other))
        }
    }
}

/// Lets the user pick an image after checking permission.
///
/// Returns `Ok(None)` when the user closed the picker without choosing.
pub async fn pick_image<G: GalleryPicker>(picker: &G) -> Result<Option<PathBuf>> {
    ensure_permission(picker)?;

    match picker.pick_image().await {
        Ok(path) => Ok(Some(path)),
        Err(PickError::Cancelled) => {
            info!("Image picking cancelled");
            Ok(None)
        }
        Err(PickError::System(reason)) => {
            let err = AppError::Picker(reason);
            error!("{}", err);
            Err(err)
        }
    }
}

/// Picks an image and displays it. `Ok(None)` means the user cancelled.
///
/// The service is only borrowed once the picker has closed, so other
/// handlers sharing it stay usable while the dialog is open.
pub async fn add_from_gallery<P, R, D, G>(
    service: &RefCell<GalleryService<P, R, D>>,
    picker: &G,
) -> Result<Option<Upsert>>
where
    P: Presenter,
    R: PathListRepository,
    D: ImageDecoder,
    G: GalleryPicker,
{
    let Some(path) = pick_image(picker).await? else {
        return Ok(None);
    };
    service.borrow_mut().add_path(picker, &path).map(Some)
}

/// Logs `err` and returns the message to show the user, if any.
pub fn user_message(err: &AppError) -> Option<String> {
    if err.is_user_visible() {
        error!("{}", err);
        Some(err.to_string())
    } else {
        warn!("{}", err);
        None
    }
}

/// Service owning the displayed gallery.
pub struct GalleryService<P: Presenter, R, D = RgbaDecoder> {
    gallery: GalleryReconciler<P, R, D>,
}

impl<P, R, D> GalleryService<P, R, D>
where
    P: Presenter,
    R: PathListRepository,
    D: ImageDecoder,
{
    pub fn new(gallery: GalleryReconciler<P, R, D>) -> Self {
        Self { gallery }
    }

    #[cfg(test)]
    pub fn gallery(&self) -> &GalleryReconciler<P, R, D> {
        &self.gallery
    }

    #[cfg(test)]
    pub fn gallery_mut(&mut self) -> &mut GalleryReconciler<P, R, D> {
        &mut self.gallery
    }

    /// Restores the saved gallery.
    pub fn init<G: GalleryPicker>(&mut self, picker: &G) -> Result<InitReport> {
        ensure_permission(picker)?;
        self.gallery.init()
    }

    /// Displays the image at `path`.
    pub fn add_path<G: GalleryPicker>(&mut self, picker: &G, path: &Path) -> Result<Upsert> {
        ensure_permission(picker)?;
        self.gallery.add_path(&path.to_string_lossy())
    }

    /// Re-reads all displayed images. Without permission nothing is touched.
    pub fn refresh<G: GalleryPicker>(&mut self, picker: &G) -> Result<RefreshReport> {
        ensure_permission(picker)?;
        self.gallery.refresh()
    }

    pub fn remove(&mut self, path: &str) -> Result<bool> {
        if path.is_empty() {
            error!("Failed to remove list item due to missing image path");
            return Ok(false);
        }
        self.gallery.remove(path)
    }
}
