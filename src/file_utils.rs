use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use std::path::Path;

/// Lowercased extension of `path` without the dot.
///
/// A file name made only of a dot and an extension (`.png`) counts as
/// having that extension, although `Path::extension` reports none for it.
fn extension(path: &Path) -> Option<String> {
    let ext = match path.extension() {
        Some(ext) => ext.to_str()?,
        None => path.file_name()?.to_str()?.strip_prefix('.')?,
    };
    Some(ext.to_lowercase())
}

/// Lowercased extension of `path` including the leading dot, or an empty
/// string when there is none.
pub fn dotted_extension(path: &Path) -> String {
    extension(path)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}

pub fn is_supported_image(path: &Path) -> bool {
    extension(path)
        .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Final segment of a path string, or the whole string if it has none.
pub fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_ignore_case() {
        assert!(is_supported_image(Path::new("/photos/a.PNG")));
        assert!(is_supported_image(Path::new("/photos/b.Jpeg")));
        assert!(!is_supported_image(Path::new("/photos/c.gif")));
        assert!(!is_supported_image(Path::new("/photos/no_extension")));
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension(Path::new("/x/y.JPG")), ".jpg");
        assert_eq!(dotted_extension(Path::new("/x/y")), "");
    }

    #[test]
    fn test_bare_extension_file_name() {
        assert!(is_supported_image(Path::new("/x/.png")));
        assert!(is_supported_image(Path::new("/x/.JPG")));
        assert_eq!(dotted_extension(Path::new("/x/.gif")), ".gif");
        assert!(!is_supported_image(Path::new("/x/.")));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/storage/DCIM/IMG_0001.jpg"), "IMG_0001.jpg");
        assert_eq!(file_name("plain.png"), "plain.png");
    }
}
