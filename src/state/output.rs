/// Result of a successful submission
///
/// Holds the watermarked image handed from the upload workflow to the
/// result screen, plus the small amount of state the result screen needs
/// for its download feedback.

use bytes::Bytes;
use chrono::{DateTime, Local};
use image::ImageReader;
use std::io::Cursor;

use super::preview::{Preview, PreviewTracker};
use crate::service::ProcessedImage;

/// Filename proposed when the original name is unknown
pub const FALLBACK_FILENAME: &str = "watermarked-image.png";

/// Suggested filename for a result derived from `original`
pub fn suggested_filename(original: &str) -> String {
    let original = original.trim();
    if original.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        format!("watermarked-{}", original)
    }
}

/// The watermarked image shown on the result screen
#[derive(Debug)]
pub struct SubmissionResult {
    pub preview: Preview,
    pub bytes: Bytes,
    pub media_type: String,
    pub suggested_filename: String,
    /// Pixel size, when the image header could be read
    pub dimensions: Option<(u32, u32)>,
    pub processed_at: DateTime<Local>,
    pub download: DownloadIndicator,
}

impl SubmissionResult {
    pub fn new(tracker: &PreviewTracker, image: ProcessedImage, original_name: &str) -> Self {
        let dimensions = probe_dimensions(&image.bytes);
        if dimensions.is_none() {
            tracing::warn!("Could not read dimensions of the returned image");
        }

        Self {
            preview: tracker.create(image.bytes.clone()),
            bytes: image.bytes,
            media_type: image.media_type,
            suggested_filename: suggested_filename(original_name),
            dimensions,
            processed_at: Local::now(),
            download: DownloadIndicator::default(),
        }
    }

    /// Short format label (e.g., "PNG")
    pub fn format_label(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .and_then(|essence| essence.trim().strip_prefix("image/"))
            .unwrap_or("image")
            .to_uppercase()
    }
}

/// Read width and height from the image header without decoding pixels
fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// "Downloading..." feedback on the result screen.
///
/// There is no completion signal for a save, so the indicator is cleared by
/// a timer. Each download gets a generation; a timer firing for an older
/// generation leaves a newer download's indicator alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadIndicator {
    active: bool,
    generation: u64,
}

impl DownloadIndicator {
    /// Mark a download as started, or `None` if one is already showing
    pub fn begin(&mut self) -> Option<u64> {
        if self.active {
            return None;
        }
        self.active = true;
        self.generation += 1;
        Some(self.generation)
    }

    /// Clear the indicator if `generation` is still the current download
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.active && self.generation == generation {
            self.active = false;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Bytes {
        let mut out = Vec::new();
        image::RgbaImage::new(3, 2)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(out)
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("photo.jpg"), "watermarked-photo.jpg");
        assert_eq!(suggested_filename(""), FALLBACK_FILENAME);
        assert_eq!(suggested_filename("  "), FALLBACK_FILENAME);
    }

    #[test]
    fn test_result_probes_dimensions() {
        let tracker = PreviewTracker::new();
        let result = SubmissionResult::new(
            &tracker,
            ProcessedImage {
                bytes: tiny_png(),
                media_type: "image/png".into(),
            },
            "photo.jpg",
        );

        assert_eq!(result.dimensions, Some((3, 2)));
        assert_eq!(result.format_label(), "PNG");
        assert_eq!(result.suggested_filename, "watermarked-photo.jpg");
        assert_eq!(tracker.live(), 1);

        drop(result);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_unreadable_image_has_no_dimensions() {
        let tracker = PreviewTracker::new();
        let result = SubmissionResult::new(
            &tracker,
            ProcessedImage {
                bytes: Bytes::from_static(b"garbage"),
                media_type: "image/png; charset=binary".into(),
            },
            "photo.jpg",
        );

        assert_eq!(result.dimensions, None);
        assert_eq!(result.format_label(), "PNG");
    }

    #[test]
    fn test_download_indicator_generations() {
        let mut indicator = DownloadIndicator::default();

        let first = indicator.begin().unwrap();
        assert!(indicator.is_active());
        assert_eq!(indicator.begin(), None);

        assert!(indicator.finish(first));
        assert!(!indicator.is_active());

        let second = indicator.begin().unwrap();
        // A late timer from the first download must not clear the second
        assert!(!indicator.finish(first));
        assert!(indicator.is_active());
        assert!(indicator.finish(second));
    }
}
