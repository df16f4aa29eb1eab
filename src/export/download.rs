//! Saving a result to disk through the native save dialog
//!
//! The dialog itself blocks like the picker does; the write runs as a
//! background task.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

use super::ExportError;

/// Ask where to save the result, proposing `suggested_filename`.
///
/// Returns `None` when the user closes the dialog without choosing.
pub fn pick_destination(suggested_filename: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Watermarked Image")
        .set_file_name(suggested_filename);

    if let Some(dir) = dirs::picture_dir().or_else(dirs::download_dir) {
        dialog = dialog.set_directory(dir);
    }

    let path = dialog.save_file();
    if path.is_none() {
        tracing::debug!("Save dialog closed without a destination");
    }
    path
}

/// Write the image bytes, creating the parent directory if needed
pub async fn write_image(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ExportError::io(parent, e))?;
        }
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ExportError::io(path, e))?;

    tracing::info!("💾 Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_image_creates_directories() {
        let dir = std::env::temp_dir().join(format!("watermarker-save-{}", std::process::id()));
        let path = dir.join("nested").join("watermarked-photo.jpg");

        write_image(&path, b"jpeg bytes").await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        tokio::fs::remove_dir_all(&dir).await.unwrap();

        assert_eq!(written, b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_write_image_reports_failure() {
        // A path below an existing file cannot be created
        let file = std::env::temp_dir().join(format!("watermarker-blocker-{}", std::process::id()));
        tokio::fs::write(&file, b"x").await.unwrap();

        let result = write_image(&file.join("out.png"), b"png").await;
        tokio::fs::remove_file(&file).await.unwrap();

        assert!(matches!(result, Err(ExportError::Io { .. })));
    }
}
