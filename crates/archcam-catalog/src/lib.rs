pub mod artifact;
pub mod naming;
pub mod scan;
pub mod store;

// Public API
pub use artifact::{CatalogEntry, RecordingArtifact, ScreenshotArtifact};
pub use naming::{ArtifactKind, NamingPolicy};
pub use scan::{list_recordings, list_screenshots, scan};
pub use store::save_screenshot;
