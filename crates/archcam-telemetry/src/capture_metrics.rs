use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared metrics for cross-thread capture monitoring
#[derive(Clone, Default)]
pub struct CaptureMetrics {
    // Event counters
    pub frames_captured: Arc<AtomicU64>,
    pub frames_dropped: Arc<AtomicU64>,
    pub capture_errors: Arc<AtomicU64>,

    // Frame rate tracking
    pub capture_fps: Arc<AtomicU64>, // Frames per second * 10

    // Activity indicators
    pub last_frame_time: Arc<RwLock<Option<Instant>>>,
}

impl CaptureMetrics {
    pub fn increment_frames(&self) {
        self.frames_captured.fetch_add(1, Ordering::Relaxed);
        *self.last_frame_time.write() = Some(Instant::now());
    }

    pub fn increment_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_errors(&self) {
        self.capture_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn update_fps(&self, fps: f64) {
        self.capture_fps.store((fps * 10.0) as u64, Ordering::Relaxed);
    }

    pub fn fps(&self) -> f64 {
        self.capture_fps.load(Ordering::Relaxed) as f64 / 10.0
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            frames_captured: self.frames_captured.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
            capture_errors: self.capture_errors.load(Ordering::Relaxed),
            fps: self.fps(),
        }
    }
}

/// Point-in-time copy of the counters, for status logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSnapshot {
    pub frames_captured: u64,
    pub frames_dropped: u64,
    pub capture_errors: u64,
    pub fps: f64,
}

#[derive(Debug)]
pub struct FpsTracker {
    last_update: Instant,
    frame_count: u64,
}

impl FpsTracker {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed >= Duration::from_secs(1) {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.last_update = Instant::now();
            self.frame_count = 0;
            Some(fps)
        } else {
            None
        }
    }
}

impl Default for FpsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let m = CaptureMetrics::default();
        m.increment_frames();
        m.increment_frames();
        m.increment_dropped();
        m.increment_errors();

        let snap = m.snapshot();
        assert_eq!(snap.frames_captured, 2);
        assert_eq!(snap.frames_dropped, 1);
        assert_eq!(snap.capture_errors, 1);
    }

    #[test]
    fn last_frame_time_set_on_capture() {
        let m = CaptureMetrics::default();
        assert!(m.last_frame_time.read().is_none());
        m.increment_frames();
        assert!(m.last_frame_time.read().is_some());
    }

    #[test]
    fn fps_round_trips_with_tenth_precision() {
        let m = CaptureMetrics::default();
        m.update_fps(29.97);
        assert!((m.fps() - 29.9).abs() < 0.11);
    }

    #[test]
    fn fps_tracker_reports_after_one_second() {
        let mut tracker = FpsTracker::new();
        assert!(tracker.tick().is_none());
        // Force the window to elapse without sleeping for a wall-clock second.
        tracker.last_update = Instant::now() - Duration::from_secs(2);
        let fps = tracker.tick().expect("window elapsed");
        assert!(fps > 0.0);
    }
}
