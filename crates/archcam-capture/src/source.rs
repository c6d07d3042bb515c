use xcap::Monitor;

use super::frame::PixelBuffer;
use archcam_foundation::CaptureError;

/// Produces one frame of the primary display per call. Each call is
/// independent; implementations retain no capture handle between calls.
pub trait FrameSource: Send {
    fn capture(&self) -> Result<PixelBuffer, CaptureError>;
}

/// Frame source backed by the platform capture library.
pub struct PrimaryDisplay;

impl Default for PrimaryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimaryDisplay {
    pub fn new() -> Self {
        Self
    }

    fn primary_monitor() -> Result<Monitor, CaptureError> {
        let monitors =
            Monitor::all().map_err(|e| CaptureError::Backend(e.to_string()))?;
        let mut fallback = None;
        for monitor in monitors {
            if monitor.is_primary().unwrap_or(false) {
                return Ok(monitor);
            }
            if fallback.is_none() {
                fallback = Some(monitor);
            }
        }
        // No monitor flagged primary: fall back to the first enumerated one.
        fallback.ok_or(CaptureError::DisplayUnavailable)
    }
}

impl FrameSource for PrimaryDisplay {
    fn capture(&self) -> Result<PixelBuffer, CaptureError> {
        let monitor = Self::primary_monitor()?;
        let image = monitor
            .capture_image()
            .map_err(|e| CaptureError::Backend(e.to_string()))?;

        let width = image.width();
        let height = image.height();
        let rgba = image.into_raw();

        // The backend hands back RGBA; the pipeline carries tightly packed RGB.
        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for px in rgba.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }

        PixelBuffer::packed(width, height, rgb)
    }
}

#[cfg(all(test, feature = "live-display-tests"))]
mod live_tests {
    use super::*;

    #[test]
    fn captures_a_nonempty_frame_from_the_real_display() {
        let source = PrimaryDisplay::new();
        let frame = source.capture().expect("display available");
        assert!(frame.width() > 0);
        assert!(frame.height() > 0);
        assert_eq!(
            frame.data().len(),
            frame.stride() * frame.height() as usize
        );
    }
}
