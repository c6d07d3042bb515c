use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Still-image output formats the screenshot writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
    Bmp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }
}

/// Video container formats the encoder writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
}

impl VideoFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "mp4",
        }
    }
}

/// Where artifacts land on disk and which formats they use.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub screenshots_dir: String,
    pub recordings_dir: String,
    pub image_format: ImageFormat,
    pub video_format: VideoFormat,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            screenshots_dir: "Screenshots".to_string(),
            recordings_dir: "Recordings".to_string(),
            image_format: ImageFormat::Png,
            video_format: VideoFormat::Mp4,
        }
    }
}

impl StorageConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn screenshots_path(&self) -> PathBuf {
        self.root.join(&self.screenshots_dir)
    }

    pub fn recordings_path(&self) -> PathBuf {
        self.root.join(&self.recordings_dir)
    }

    /// Creates both artifact directories if absent. Called once at startup.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.screenshots_path())?;
        std::fs::create_dir_all(self.recordings_path())?;
        Ok(())
    }
}

/// Tuning for the continuous capture loop.
#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    /// Pause after a failed capture so a persistently unavailable display
    /// does not spin the loop.
    pub error_backoff: Duration,
    /// Optional pacing between frames. `None` captures as fast as the
    /// frame source allows.
    pub frame_interval: Option<Duration>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            error_backoff: Duration::from_millis(250),
            frame_interval: None,
        }
    }
}

/// Fixed invocation parameters for the external encoder process.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub display: String,
    pub width: u32,
    pub height: u32,
    /// Bound on the graceful-exit wait in `stop()` before the process is
    /// force-killed.
    pub stop_timeout: Duration,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            display: ":0.0".to_string(),
            width: 1920,
            height: 1080,
            stop_timeout: Duration::from_secs(5),
        }
    }
}

impl EncoderConfig {
    pub fn geometry(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// File extension of a path as lowercase UTF-8, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
