/// Preview handles for images held in memory
///
/// A `Preview` wraps an iced image handle built from raw file bytes.
/// Every preview is registered with a `PreviewTracker` when created and
/// unregistered when dropped, so replacing or clearing the owner is enough
/// to release it. The tracker's live count is what tests and debug logs use
/// to check that nothing leaks across repeated selections.

use bytes::Bytes;
use iced::widget::image::Handle;
use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts previews that are currently alive.
///
/// Cloning the tracker shares the same counters.
#[derive(Debug, Clone, Default)]
pub struct PreviewTracker {
    live: Arc<AtomicUsize>,
    next_id: Arc<AtomicU64>,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preview for the given image bytes
    pub fn create(&self, bytes: Bytes) -> Preview {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let live = self.live.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(preview = id, live, "preview created");

        Preview {
            id,
            handle: Handle::from_bytes(bytes),
            live: Arc::clone(&self.live),
        }
    }

    /// Number of previews not yet released
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

/// A revocable, in-memory image handle.
///
/// Not `Clone`: exactly one owner exists, and dropping it releases the
/// preview.
pub struct Preview {
    id: u64,
    handle: Handle,
    live: Arc<AtomicUsize>,
}

impl Preview {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Handle to render with `iced::widget::image`
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        let live = self.live.fetch_sub(1, Ordering::AcqRel) - 1;
        tracing::trace!(preview = self.id, live, "preview released");
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preview").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_releases_preview() {
        let tracker = PreviewTracker::new();
        let first = tracker.create(Bytes::from_static(b"a"));
        let second = tracker.create(Bytes::from_static(b"b"));
        assert_eq!(tracker.live(), 2);
        assert_ne!(first.id(), second.id());

        drop(first);
        assert_eq!(tracker.live(), 1);

        drop(second);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn test_replacing_slot_releases_previous() {
        let tracker = PreviewTracker::new();
        let mut slot = Some(tracker.create(Bytes::from_static(b"old")));
        assert!(slot.is_some());

        for _ in 0..5 {
            slot = Some(tracker.create(Bytes::from_static(b"new")));
            assert_eq!(tracker.live(), 1);
        }

        slot.take();
        assert_eq!(tracker.live(), 0);
    }
}
