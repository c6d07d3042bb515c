pub mod capture;
pub mod frame;
pub mod sink;
pub mod source;

// Public API
pub use capture::CaptureThread;
pub use frame::{PixelBuffer, PixelFormat};
pub use sink::{FrameSink, LatestFrameSlot};
pub use source::{FrameSource, PrimaryDisplay};
