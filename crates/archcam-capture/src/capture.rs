use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::sink::FrameSink;
use super::source::FrameSource;
use archcam_foundation::{CaptureConfig, CaptureError, SharedClock};
use archcam_telemetry::{CaptureMetrics, FpsTracker};

/// Handle to the dedicated frame-capture thread.
///
/// The loop pulls frames from the source as fast as it allows (or at the
/// configured pacing interval) and moves each one into the sink. A failed
/// capture is logged and retried after a short backoff; it never terminates
/// the loop. `stop()` requests cooperative cancellation, checked at the top
/// of each iteration, and joins the thread; an in-flight capture call is
/// not preempted.
pub struct CaptureThread {
    handle: JoinHandle<()>,
    shutdown: Arc<AtomicBool>,
}

impl CaptureThread {
    pub fn spawn<S>(
        source: S,
        sink: Arc<dyn FrameSink>,
        config: CaptureConfig,
        metrics: CaptureMetrics,
        clock: SharedClock,
    ) -> Result<Self, CaptureError>
    where
        S: FrameSource + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let shutdown = running.clone();

        let handle = thread::Builder::new()
            .name("frame-capture".to_string())
            .spawn(move || {
                run_loop(source, sink, config, metrics, clock, running);
            })
            .map_err(|e| {
                CaptureError::Fatal(format!("Failed to spawn capture thread: {}", e))
            })?;

        Ok(Self { handle, shutdown })
    }

    pub fn stop(self) {
        self.shutdown.store(false, Ordering::SeqCst);
        let _ = self.handle.join();
    }
}

fn run_loop<S: FrameSource>(
    source: S,
    sink: Arc<dyn FrameSink>,
    config: CaptureConfig,
    metrics: CaptureMetrics,
    clock: SharedClock,
    running: Arc<AtomicBool>,
) {
    tracing::info!("Frame capture loop started");
    let mut fps_tracker = FpsTracker::new();

    while running.load(Ordering::SeqCst) {
        match source.capture() {
            Ok(frame) => {
                metrics.increment_frames();
                if let Some(fps) = fps_tracker.tick() {
                    metrics.update_fps(fps);
                }
                sink.deliver(frame);
                if let Some(interval) = config.frame_interval {
                    clock.sleep(interval);
                }
            }
            Err(e) => {
                metrics.increment_errors();
                if e.is_transient() {
                    tracing::warn!("Frame capture failed: {}; retrying", e);
                } else {
                    tracing::error!("Frame capture failed: {}", e);
                }
                clock.sleep(config.error_backoff);
            }
        }
    }

    tracing::info!("Frame capture loop shutting down");
}
