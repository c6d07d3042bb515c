pub mod encoder;
pub mod preview;
pub mod probe;
pub mod session;

// Public API
pub use encoder::{Encoder, EncoderChild, FfmpegEncoder};
pub use preview::open_with_default_app;
pub use probe::{DurationProbe, FfprobeDuration};
pub use session::{RecordingManager, StartOutcome, StopOutcome, Termination};
