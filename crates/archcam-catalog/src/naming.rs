/// The two artifact families with independent default-name counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Screenshot,
    Recording,
}

impl ArtifactKind {
    fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Screenshot => "screenshot",
            ArtifactKind::Recording => "recording",
        }
    }
}

/// Generates default output filenames from per-kind monotonic counters.
///
/// Counter state lives for the process lifetime only and restarts at 1, so
/// names can collide with files left over from a previous run. The counters
/// are deliberately not derived from directory contents.
#[derive(Debug)]
pub struct NamingPolicy {
    screenshot_count: u32,
    recording_count: u32,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl NamingPolicy {
    pub fn new() -> Self {
        Self {
            screenshot_count: 1,
            recording_count: 1,
        }
    }

    /// Returns the next default filename for `kind` and advances that
    /// kind's counter. Callers invoke this only on a path that actually
    /// produces a file, so the counter tracks successful saves.
    pub fn next(&mut self, kind: ArtifactKind, extension: &str) -> String {
        let counter = match kind {
            ArtifactKind::Screenshot => &mut self.screenshot_count,
            ArtifactKind::Recording => &mut self.recording_count,
        };
        let name = format!("archcam-{}{}.{}", kind.label(), counter, extension);
        *counter += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_screenshot_names() {
        let mut policy = NamingPolicy::new();
        assert_eq!(
            policy.next(ArtifactKind::Screenshot, "png"),
            "archcam-screenshot1.png"
        );
        assert_eq!(
            policy.next(ArtifactKind::Screenshot, "png"),
            "archcam-screenshot2.png"
        );
        assert_eq!(
            policy.next(ArtifactKind::Screenshot, "png"),
            "archcam-screenshot3.png"
        );
    }

    #[test]
    fn kinds_count_independently() {
        let mut policy = NamingPolicy::new();
        policy.next(ArtifactKind::Screenshot, "png");
        policy.next(ArtifactKind::Screenshot, "jpg");
        assert_eq!(
            policy.next(ArtifactKind::Recording, "mp4"),
            "archcam-recording1.mp4"
        );
    }
}
