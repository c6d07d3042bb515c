use std::path::Path;
use std::process::Command;

/// Extracts a container's reported duration after a recording completes.
pub trait DurationProbe: Send + Sync {
    /// `None` when the duration cannot be determined. A missing duration
    /// never fails the stop operation that requested it.
    fn duration_secs(&self, path: &Path) -> Option<f64>;
}

/// ffprobe asked for the format duration as bare text on stdout.
pub struct FfprobeDuration;

impl DurationProbe for FfprobeDuration {
    fn duration_secs(&self, path: &Path) -> Option<f64> {
        let output = Command::new("ffprobe")
            .args(["-v", "error"])
            .args(["-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(path)
            .output();

        let output = match output {
            Ok(o) => o,
            Err(e) => {
                tracing::warn!("ffprobe failed to run: {}", e);
                return None;
            }
        };

        if !output.status.success() {
            tracing::warn!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        parse_duration(&output.stdout)
    }
}

/// Plain-text seconds; empty, non-numeric, or non-finite output means
/// unknown.
fn parse_duration(stdout: &[u8]) -> Option<f64> {
    let text = std::str::from_utf8(stdout).ok()?;
    let value: f64 = text.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
