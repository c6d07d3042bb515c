use archcam_foundation::{ImageFormat, VideoFormat};
use serde::Serialize;
use std::path::PathBuf;

/// A file found by a catalog scan. The filesystem is the index: entries are
/// derived from a directory listing at query time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenshotArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub format: ImageFormat,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordingArtifact {
    pub file_name: String,
    pub path: PathBuf,
    pub format: VideoFormat,
    pub size_bytes: u64,
    /// `None` when the duration probe could not read the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}
