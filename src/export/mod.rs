/// Getting a result out of the application
///
/// - `download.rs` saves it through the native save dialog
/// - `share.rs` hands it to the configured share command

pub mod download;
pub mod share;

use std::path::Path;
use thiserror::Error;

pub use share::{SharePayload, ShareTarget};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExportError {
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to launch {program}: {message}")]
    Launch { program: String, message: String },

    #[error("{program} exited with {}", exit_label(.code))]
    CommandFailed { program: String, code: Option<i32> },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl ExportError {
    fn io(path: &Path, e: std::io::Error) -> Self {
        ExportError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}
