/// File intake from disk
///
/// Reads files chosen through the native picker or dropped onto the window
/// and turns them into `FileCandidate`s. No validation happens here: the
/// session decides whether a candidate is acceptable.

use bytes::Bytes;
use image::ImageFormat;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::{FileCandidate, Role};

/// Media type used when the extension is not a known image format
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Extensions offered by the file picker filter
pub const PICKER_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },
}

/// Show the native file picker for one role
///
/// The filter only narrows what the dialog shows; every path still goes
/// through validation in the session.
pub fn pick_image(role: Role) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(format!("Select {}", role.label()))
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_file()
}

/// Load a file from disk as a candidate for one of the upload roles
pub async fn load_candidate(path: PathBuf) -> Result<FileCandidate, FileError> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FileError::NotFound(path.display().to_string())
        } else {
            FileError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        }
    })?;

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    let media_type = media_type_for(&path);

    tracing::debug!("📄 Loaded {} ({}, {} bytes)", name, media_type, bytes.len());

    Ok(FileCandidate {
        name,
        media_type,
        bytes: Bytes::from(bytes),
        path: Some(path),
    })
}

/// Declared media type of a file, based on its extension only
///
/// Content is not sniffed: a `.txt` file full of PNG bytes is still text.
pub fn media_type_for(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MEDIA_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_for_images() {
        assert_eq!(media_type_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("photo.JPEG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("/tmp/logo.png")), "image/png");
        assert_eq!(media_type_for(Path::new("anim.gif")), "image/gif");
    }

    #[test]
    fn test_media_type_for_other_files() {
        assert_eq!(media_type_for(Path::new("notes.txt")), FALLBACK_MEDIA_TYPE);
        assert_eq!(media_type_for(Path::new("no_extension")), FALLBACK_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_candidate(PathBuf::from("/nonexistent/path.png")).await;
        assert!(matches!(result, Err(FileError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_candidate_from_disk() {
        let path = std::env::temp_dir().join(format!("watermarker-intake-{}.png", std::process::id()));
        tokio::fs::write(&path, b"\x89PNG fake").await.unwrap();

        let candidate = load_candidate(path.clone()).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(candidate.media_type, "image/png");
        assert_eq!(candidate.bytes.as_ref(), b"\x89PNG fake");
        assert!(candidate.name.starts_with("watermarker-intake-"));
        assert!(candidate.is_image());
    }
}
