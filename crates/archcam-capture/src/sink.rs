use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use super::frame::PixelBuffer;

/// Receives frames from the capture loop. `deliver` must hand the frame off
/// without blocking; the capture thread never waits on a consumer.
pub trait FrameSink: Send + Sync {
    fn deliver(&self, frame: PixelBuffer);
}

/// Latest-value slot: holds at most one frame, and a newer frame replaces
/// any frame the consumer has not taken yet. The consumer sees the most
/// recent frame, not every frame.
#[derive(Default)]
pub struct LatestFrameSlot {
    slot: Mutex<Option<PixelBuffer>>,
    superseded: AtomicU64,
}

impl LatestFrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the stored frame, if any.
    pub fn take(&self) -> Option<PixelBuffer> {
        self.slot.lock().take()
    }

    /// How many frames were replaced before the consumer took them.
    pub fn superseded(&self) -> u64 {
        self.superseded.load(Ordering::Relaxed)
    }
}

impl FrameSink for LatestFrameSlot {
    fn deliver(&self, frame: PixelBuffer) {
        let mut slot = self.slot.lock();
        if slot.replace(frame).is_some() {
            self.superseded.fetch_add(1, Ordering::Relaxed);
        }
    }
}
