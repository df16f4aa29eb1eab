//! Sharing a result through a host command
//!
//! Desktop platforms have no single share sheet, so the share capability is
//! whatever command the user configured (a mail client, a chat CLI, a
//! script). The result is staged as a named file and the command is run
//! with placeholders filled in.

use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::ExportError;

/// What gets shared
#[derive(Debug, Clone)]
pub struct SharePayload {
    pub file_name: String,
    pub bytes: Bytes,
    pub title: String,
    pub text: String,
}

/// A configured share command plus the directory results are staged in
#[derive(Debug, Clone, PartialEq)]
pub struct ShareTarget {
    command: Vec<String>,
    staging_dir: PathBuf,
}

impl ShareTarget {
    /// Build a target from the configured argv, or `None` when sharing is
    /// not supported on this system
    pub fn from_config(command: Option<&[String]>) -> Option<Self> {
        let command = command?;
        if command.is_empty() || command[0].trim().is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_vec(),
            staging_dir: default_staging_dir(),
        })
    }

    #[cfg(test)]
    pub fn with_staging_dir(mut self, dir: PathBuf) -> Self {
        self.staging_dir = dir;
        self
    }

    pub fn program(&self) -> &str {
        &self.command[0]
    }

    /// Stage the payload and run the share command until it exits
    pub async fn share(self, payload: SharePayload) -> Result<PathBuf, ExportError> {
        tokio::fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| ExportError::io(&self.staging_dir, e))?;

        let file = self.staging_dir.join(sanitize_file_name(&payload.file_name));
        tokio::fs::write(&file, &payload.bytes)
            .await
            .map_err(|e| ExportError::io(&file, e))?;

        let args = substitute_args(&self.command[1..], &file, &payload);
        tracing::debug!("Sharing via {} {:?}", self.program(), args);

        let status = Command::new(self.program())
            .args(&args)
            .status()
            .await
            .map_err(|e| ExportError::Launch {
                program: self.program().to_string(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ExportError::CommandFailed {
                program: self.program().to_string(),
                code: status.code(),
            });
        }

        tracing::info!("🔗 Shared {}", file.display());
        Ok(file)
    }
}

/// ~/.cache/watermarker/shared on Linux
fn default_staging_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("watermarker")
        .join("shared")
}

/// Fill `{file}`, `{title}` and `{text}` in each argument
fn substitute_args(args: &[String], file: &Path, payload: &SharePayload) -> Vec<String> {
    let file = file.to_string_lossy();
    args.iter()
        .map(|arg| {
            arg.replace("{file}", &file)
                .replace("{title}", &payload.title)
                .replace("{text}", &payload.text)
        })
        .collect()
}

/// Keep the staged file inside the staging directory
fn sanitize_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    let safe = safe.trim_start_matches('.');
    if safe.is_empty() {
        "watermarked-image.png".to_string()
    } else {
        safe.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SharePayload {
        SharePayload {
            file_name: "watermarked-photo.jpg".into(),
            bytes: Bytes::from_static(b"jpeg"),
            title: "Watermarked Image".into(),
            text: "Check out my watermarked image!".into(),
        }
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unsupported_without_command() {
        assert_eq!(ShareTarget::from_config(None), None);
        assert_eq!(ShareTarget::from_config(Some(Vec::new().as_slice())), None);
        assert_eq!(ShareTarget::from_config(Some(argv(&["  "]).as_slice())), None);
        assert!(ShareTarget::from_config(Some(argv(&["xdg-open", "{file}"]).as_slice())).is_some());
    }

    #[test]
    fn test_substitute_args() {
        let args = argv(&["--subject", "{title}", "--body", "{text}", "--attach={file}"]);
        let result = substitute_args(&args, Path::new("/tmp/out.jpg"), &payload());
        assert_eq!(
            result,
            argv(&[
                "--subject",
                "Watermarked Image",
                "--body",
                "Check out my watermarked image!",
                "--attach=/tmp/out.jpg",
            ])
        );
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("watermarked-photo.jpg"), "watermarked-photo.jpg");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "_.._etc_passwd");
        assert_eq!(sanitize_file_name("my photo.png"), "my_photo.png");
        assert_eq!(sanitize_file_name(""), "watermarked-image.png");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_share_stages_file_and_runs_command() {
        let dir = std::env::temp_dir().join(format!("watermarker-share-{}", std::process::id()));
        let target = ShareTarget::from_config(Some(argv(&["test", "-f", "{file}"]).as_slice()))
            .unwrap()
            .with_staging_dir(dir.clone());

        let staged = target.share(payload()).await.unwrap();
        assert_eq!(staged, dir.join("watermarked-photo.jpg"));
        assert_eq!(tokio::fs::read(&staged).await.unwrap(), b"jpeg");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_share_reports_failing_command() {
        let dir = std::env::temp_dir().join(format!("watermarker-share-fail-{}", std::process::id()));
        let target = ShareTarget::from_config(Some(argv(&["false"]).as_slice()))
            .unwrap()
            .with_staging_dir(dir.clone());

        let result = target.share(payload()).await;
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert!(matches!(result, Err(ExportError::CommandFailed { .. })));
    }
}
