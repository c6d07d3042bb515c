use std::path::Path;
use std::process::{Command, Stdio};

use archcam_foundation::RecorderError;

/// Opens a completed artifact with the host's default file association.
/// Fire-and-forget: the viewer's result is not awaited. The child is reaped
/// in the background so it never lingers as a zombie.
pub fn open_with_default_app(path: &Path) -> Result<(), RecorderError> {
    let mut child = Command::new("xdg-open")
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(RecorderError::Spawn)?;

    tracing::info!("Opening {} with default application", path.display());
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
