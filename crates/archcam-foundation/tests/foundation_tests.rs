//! Foundation crate tests
//!
//! Tests cover:
//! - Clock abstraction (SystemClock, ManualClock)
//! - Error types (ArchCamError variants, CaptureError, RecorderError, CatalogError)
//! - Storage configuration and directory creation

use archcam_foundation::clock::{manual_clock, system_clock, Clock, ManualClock, SystemClock};
use archcam_foundation::config::{
    extension_of, EncoderConfig, ImageFormat, StorageConfig, VideoFormat,
};
use archcam_foundation::error::{ArchCamError, CaptureError, CatalogError, RecorderError};
use std::path::Path;
use std::time::{Duration, Instant};

// ─── Clock Tests ────────────────────────────────────────────────────

#[test]
fn system_clock_now_returns_current_time() {
    let clock = SystemClock;
    let before = Instant::now();
    let clock_time = clock.now();
    let after = Instant::now();
    assert!(clock_time >= before);
    assert!(clock_time <= after);
}

#[test]
fn system_clock_factory_function() {
    let clock = system_clock();
    let t = clock.now();
    assert!(t.elapsed() < Duration::from_secs(1));
}

#[test]
fn manual_clock_advance() {
    let clock = ManualClock::new();
    let t0 = clock.now();
    clock.advance(Duration::from_secs(5));
    let t1 = clock.now();
    assert_eq!(t1.duration_since(t0), Duration::from_secs(5));
}

#[test]
fn manual_clock_sleep_advances_time() {
    let clock = ManualClock::new();
    let t0 = clock.now();
    clock.sleep(Duration::from_secs(10));
    let t1 = clock.now();
    assert_eq!(t1.duration_since(t0), Duration::from_secs(10));
}

#[test]
fn manual_clock_advance_accumulates() {
    let clock = manual_clock();
    let start = clock.now();
    clock.advance(Duration::from_millis(100));
    clock.advance(Duration::from_millis(200));
    clock.advance(Duration::from_millis(300));
    assert_eq!(clock.now().duration_since(start), Duration::from_millis(600));
}

// ─── Error Type Tests ───────────────────────────────────────────────

#[test]
fn capture_error_display_unavailable_is_transient() {
    let err = CaptureError::DisplayUnavailable;
    assert!(err.is_transient());
    let msg = format!("{}", err);
    assert!(msg.contains("primary display"));
}

#[test]
fn capture_error_buffer_shape() {
    let err = CaptureError::BufferShape {
        width: 1920,
        height: 1080,
        stride: 5760,
        len: 100,
    };
    assert!(!err.is_transient());
    let msg = format!("{}", err);
    assert!(msg.contains("1920"));
    assert!(msg.contains("5760"));
}

#[test]
fn recorder_error_spawn() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "ffmpeg not found");
    let err = RecorderError::Spawn(io);
    let msg = format!("{}", err);
    assert!(msg.contains("launch encoder"));
}

#[test]
fn archcam_error_from_capture_error() {
    let err: ArchCamError = CaptureError::DisplayUnavailable.into();
    assert!(matches!(err, ArchCamError::Capture(_)));
}

#[test]
fn archcam_error_from_catalog_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: ArchCamError = CatalogError::Io(io).into();
    assert!(matches!(err, ArchCamError::Catalog(_)));
}

#[test]
fn archcam_error_from_recorder_error() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: ArchCamError = RecorderError::Spawn(io).into();
    assert!(matches!(err, ArchCamError::Recorder(_)));
}

// ─── Config Tests ───────────────────────────────────────────────────

#[test]
fn image_format_extensions() {
    assert_eq!(ImageFormat::Png.extension(), "png");
    assert_eq!(ImageFormat::Jpg.extension(), "jpg");
    assert_eq!(ImageFormat::Bmp.extension(), "bmp");
}

#[test]
fn video_format_extension() {
    assert_eq!(VideoFormat::Mp4.extension(), "mp4");
}

#[test]
fn storage_config_default_directories() {
    let cfg = StorageConfig::default();
    assert!(cfg.screenshots_path().ends_with("Screenshots"));
    assert!(cfg.recordings_path().ends_with("Recordings"));
}

#[test]
fn storage_config_ensure_dirs_creates_both() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cfg = StorageConfig::with_root(tmp.path());
    cfg.ensure_dirs().expect("ensure_dirs");
    assert!(cfg.screenshots_path().is_dir());
    assert!(cfg.recordings_path().is_dir());
    // Idempotent on a second call.
    cfg.ensure_dirs().expect("ensure_dirs again");
}

#[test]
fn encoder_config_geometry_string() {
    let cfg = EncoderConfig::default();
    assert_eq!(cfg.geometry(), "1920x1080");
    assert_eq!(cfg.display, ":0.0");
}

#[test]
fn extension_of_lowercases() {
    assert_eq!(extension_of(Path::new("a/shot.PNG")), Some("png".into()));
    assert_eq!(extension_of(Path::new("clip.mp4")), Some("mp4".into()));
    assert_eq!(extension_of(Path::new("noext")), None);
}
