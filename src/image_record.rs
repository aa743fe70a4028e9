//! In-memory image records and the factory resolving them from disk.

use crate::config::allowed_extensions_display;
use crate::error::{AppError, Result};
use crate::file_utils;
use crate::image_loader::{DecodedImage, ImageDecoder, RgbaDecoder};
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Snapshot of one image file.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    full_path: String,
    created_date: DateTime<Utc>,
    image: Option<DecodedImage>,
}

impl ImageRecord {
    pub fn new(
        full_path: impl Into<String>,
        image: Option<DecodedImage>,
        created_date: DateTime<Utc>,
    ) -> Self {
        Self {
            full_path: full_path.into(),
            created_date,
            image,
        }
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn file_name(&self) -> &str {
        file_utils::file_name(&self.full_path)
    }

    pub fn created_date(&self) -> DateTime<Utc> {
        self.created_date
    }

    /// Decoded bitmap; `None` when decoding failed and a fallback should be shown.
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }
}

/// Builds [`ImageRecord`]s from file paths.
#[derive(Debug, Clone)]
pub struct ImageRecordFactory<D = RgbaDecoder> {
    decoder: D,
}

impl ImageRecordFactory {
    /// Factory decoding with the `image` crate.
    pub fn rgba() -> Self {
        Self::new(RgbaDecoder)
    }
}

impl<D: ImageDecoder> ImageRecordFactory<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Resolves `path` into a fresh record.
    ///
    /// Fails on an unsupported extension or a missing/unreadable file. A
    /// decoding failure is logged and yields a record without a bitmap.
    pub fn build(&self, path: &str) -> Result<ImageRecord> {
        let file_path = Path::new(path);

        if !file_utils::is_supported_image(file_path) {
            let err = AppError::InvalidExtension {
                found: file_utils::dotted_extension(file_path),
                expected: allowed_extensions_display(),
            };
            error!("{}", err);
            return Err(err);
        }

        let not_found = |reason: String| {
            let err = AppError::FileNotFound {
                path: path.to_string(),
                reason,
            };
            error!("{}", err);
            err
        };

        if !file_path.is_file() {
            return Err(not_found("not a regular file".to_string()));
        }

        let bytes = fs::read(file_path).map_err(|e| not_found(e.to_string()))?;

        let image = match self.decoder.decode(&bytes) {
            Ok(image) => Some(image),
            Err(reason) => {
                let err = AppError::DecodeFailure {
                    path: path.to_string(),
                    reason,
                };
                error!("{}", err);
                None
            }
        };

        let created_date = creation_time(file_path);
        debug!("Resolved image record: {} (created {})", path, created_date);

        Ok(ImageRecord::new(path, image, created_date))
    }
}

/// Birth time of the file in UTC, falling back to the modification time on
/// filesystems that do not record it.
fn creation_time(path: &Path) -> DateTime<Utc> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Failed to read metadata of {}: {}", path.display(), e);
            return Utc::now();
        }
    };

    let time: SystemTime = metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or_else(|e| {
            warn!("No timestamps available for {}: {}", path.display(), e);
            SystemTime::now()
        });

    DateTime::<Utc>::from(time)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writes a small valid PNG and returns its path.
    pub(crate) fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 255]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_build_valid_png() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "sunset.png");
        let path = path.to_str().unwrap();

        let record = ImageRecordFactory::rgba().build(path).unwrap();

        assert_eq!(record.full_path(), path);
        assert_eq!(record.file_name(), "sunset.png");
        let image = record.image().unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert!(record.created_date() <= Utc::now());
    }

    #[test]
    fn test_disallowed_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("animation.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let err = ImageRecordFactory::rgba().build(path.to_str().unwrap()).unwrap_err();

        assert!(matches!(err, AppError::InvalidExtension { ref found, .. } if found == ".gif"));
        assert!(err.to_string().contains(".png, .jpg, .jpeg"));
        assert!(err.is_user_visible());
    }

    #[test]
    fn test_uppercase_extension_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "LOUD.PNG");

        let record = ImageRecordFactory::rgba().build(path.to_str().unwrap()).unwrap();

        assert_eq!(record.file_name(), "LOUD.PNG");
    }

    #[test]
    fn test_missing_file_is_log_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.jpg");

        let err = ImageRecordFactory::rgba().build(path.to_str().unwrap()).unwrap_err();

        assert!(matches!(err, AppError::FileNotFound { .. }));
        assert!(!err.is_user_visible());
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("folder.png");
        fs::create_dir(&sub).unwrap();

        let err = ImageRecordFactory::rgba().build(sub.to_str().unwrap()).unwrap_err();

        assert!(matches!(err, AppError::FileNotFound { .. }));
    }

    #[test]
    fn test_undecodable_file_keeps_record_without_bitmap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.jpg");
        fs::write(&path, b"not a jpeg at all").unwrap();

        let record = ImageRecordFactory::rgba().build(path.to_str().unwrap()).unwrap();

        assert!(record.image().is_none());
        assert_eq!(record.file_name(), "corrupt.jpg");
    }

    #[test]
    fn test_each_build_is_independent() {
        let dir = TempDir::new().unwrap();
        let path = write_png(dir.path(), "a.png");
        let factory = ImageRecordFactory::rgba();

        let first = factory.build(path.to_str().unwrap()).unwrap();
        write_png(dir.path(), "a.png");
        let second = factory.build(path.to_str().unwrap()).unwrap();

        assert_eq!(first.full_path(), second.full_path());
        assert_eq!(first.image(), second.image());
    }
}
