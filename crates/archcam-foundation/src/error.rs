use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchCamError {
    #[error("Capture subsystem error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Recorder subsystem error: {0}")]
    Recorder(#[from] RecorderError),

    #[error("Catalog subsystem error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fatal error, cannot recover: {0}")]
    Fatal(String),
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No primary display available")]
    DisplayUnavailable,

    #[error("Frame shape mismatch: {width}x{height} with stride {stride} cannot hold {len} bytes")]
    BufferShape {
        width: u32,
        height: u32,
        stride: usize,
        len: usize,
    },

    #[error("Capture backend error: {0}")]
    Backend(String),

    #[error("Fatal error, cannot recover: {0}")]
    Fatal(String),
}

impl CaptureError {
    /// Whether the capture loop should keep running and retry after backoff.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CaptureError::DisplayUnavailable | CaptureError::Backend(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Failed to launch encoder process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Encoder process error: {0}")]
    Process(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode screenshot: {0}")]
    Encode(String),
}
