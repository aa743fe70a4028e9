//! Application configuration constants.

use std::time::Duration;

/// Image file extensions accepted by the record factory and the picker filter.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Directory under the application data root holding persisted JSON files.
pub const SAVES_DIR_NAME: &str = ".gamefiles";

/// Logical key of the persisted list of displayed image paths.
pub const CACHED_PATHS_LIST_KEY: &str = "CACHED_PATHS_LIST";

/// Directory name created under the platform data directory.
pub const APP_ID: &str = "gallery-preview";

/// Period of the elapsed-time ticker.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Human readable list of allowed extensions, e.g. `.png, .jpg, .jpeg`.
pub fn allowed_extensions_display() -> String {
    SUPPORTED_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}
