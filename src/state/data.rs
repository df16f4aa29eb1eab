/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// file intake, the session state machine, the HTTP client and the UI.

use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;

use super::preview::Preview;

/// One of the two input slots of the upload workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The base image the watermark is applied to
    Main,
    /// The logo used as the watermark
    Logo,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Main, Role::Logo];

    /// Title shown above the drop zone
    pub fn label(self) -> &'static str {
        match self {
            Role::Main => "Main Image",
            Role::Logo => "Watermark Logo",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Role::Main => "Drop your photo here or click to browse",
            Role::Logo => "Drop your logo here or click to browse",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file read from disk that has not been validated yet
#[derive(Clone, PartialEq)]
pub struct FileCandidate {
    /// Filename only (e.g., "photo.jpg")
    pub name: String,
    /// Declared media type, derived from the extension
    pub media_type: String,
    /// Full file contents
    pub bytes: Bytes,
    /// Where the file came from, if it came from disk
    pub path: Option<PathBuf>,
}

impl FileCandidate {
    /// Whether the declared media type is an image type
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl fmt::Debug for FileCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCandidate")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .field("path", &self.path)
            .finish()
    }
}

/// An accepted file occupying a role, together with its live preview
#[derive(Debug)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
    pub preview: Preview,
}

impl SelectedFile {
    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Snapshot the file for an upload
    pub fn to_part(&self) -> UploadPart {
        UploadPart {
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// One file of a multipart upload
#[derive(Clone, PartialEq)]
pub struct UploadPart {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl fmt::Debug for UploadPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadPart")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Both files of a submission, captured when the submission begins
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub main: UploadPart,
    pub logo: UploadPart,
}

/// Human readable byte size (e.g., "240.5 KB")
pub fn format_size(len: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let len = len as f64;
    if len >= MB {
        format!("{:.1} MB", len / MB)
    } else if len >= KB {
        format!("{:.1} KB", len / KB)
    } else {
        format!("{} B", len)
    }
}
