//! Unified error types for the gallery preview application.

use crate::permission::Permission;
use thiserror::Error;

/// Application-specific errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// The file extension is not one of the supported image formats.
    #[error("Unsupported file extension \"{found}\", expected one of: {expected}")]
    InvalidExtension { found: String, expected: String },

    /// The path does not reference a readable regular file.
    #[error("Failed to load file, it doesn't exist or can't be read. Path: {path} ({reason})")]
    FileNotFound { path: String, reason: String },

    /// The file bytes could not be decoded into a bitmap.
    #[error("Failed to decode image {path}: {reason}")]
    DecodeFailure { path: String, reason: String },

    /// Persisted state could not be written.
    #[error("Failed to save {key}: {reason}")]
    PersistenceWrite { key: String, reason: String },

    /// Persisted state could not be read.
    #[error("Failed to load {key}: {reason}")]
    PersistenceRead { key: String, reason: String },

    /// Read access to the gallery has not been granted.
    #[error("Files read permission: {0}")]
    PermissionDenied(Permission),

    /// The gallery picker failed for a reason other than cancellation.
    #[error("Gallery picker failed: {0}")]
    Picker(String),
}

impl AppError {
    /// Whether the error should be shown to the user in a dialog.
    ///
    /// Everything else is only logged; the affected record is dropped or
    /// rendered with a fallback.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            AppError::InvalidExtension { .. }
                | AppError::PermissionDenied(_)
                | AppError::PersistenceWrite { .. }
                | AppError::Picker(_)
        )
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_extension_message() {
        let err = AppError::InvalidExtension {
            found: ".gif".to_string(),
            expected: ".png, .jpg, .jpeg".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file extension \".gif\", expected one of: .png, .jpg, .jpeg"
        );
        assert!(err.is_user_visible());
    }

    #[test]
    fn test_log_only_errors() {
        let not_found = AppError::FileNotFound {
            path: "/a.png".to_string(),
            reason: "missing".to_string(),
        };
        let decode = AppError::DecodeFailure {
            path: "/a.png".to_string(),
            reason: "bad header".to_string(),
        };
        assert!(!not_found.is_user_visible());
        assert!(!decode.is_user_visible());
    }

    #[test]
    fn test_permission_denied_message() {
        let err = AppError::PermissionDenied(Permission::Denied);
        assert_eq!(err.to_string(), "Files read permission: Denied");
        assert!(err.is_user_visible());
    }
}
