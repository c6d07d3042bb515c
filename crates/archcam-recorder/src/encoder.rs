use std::io;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use archcam_foundation::{EncoderConfig, RecorderError};

/// Handle to a spawned encoder process. The session manager supervises the
/// process only through this seam, so tests can script one.
pub trait EncoderChild: Send {
    /// Asks the process to exit gracefully (SIGTERM on Unix).
    fn terminate(&mut self) -> io::Result<()>;

    /// Reaps the process if it has exited. `Ok(true)` once it is gone.
    fn try_wait(&mut self) -> io::Result<bool>;

    /// Force-kills and reaps the process.
    fn kill(&mut self) -> io::Result<()>;
}

/// Launches the external encoder for one recording.
pub trait Encoder: Send + Sync {
    fn spawn(&self, output: &Path) -> Result<Box<dyn EncoderChild>, RecorderError>;
}

/// ffmpeg grabbing the primary display at fixed geometry, encoding H.264
/// into the target file.
pub struct FfmpegEncoder {
    config: EncoderConfig,
}

impl FfmpegEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }
}

impl Encoder for FfmpegEncoder {
    fn spawn(&self, output: &Path) -> Result<Box<dyn EncoderChild>, RecorderError> {
        let child = Command::new("ffmpeg")
            .args(["-f", "x11grab"])
            .args(["-s", &self.config.geometry()])
            .args(["-i", &self.config.display])
            .args(["-c:v", "libx264"])
            .arg(output)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(RecorderError::Spawn)?;

        tracing::info!(
            "Encoder started (pid {}) writing {}",
            child.id(),
            output.display()
        );
        Ok(Box::new(FfmpegChild { child }))
    }
}

struct FfmpegChild {
    child: Child,
}

impl EncoderChild for FfmpegChild {
    fn terminate(&mut self) -> io::Result<()> {
        #[cfg(unix)]
        {
            let pid = self.child.id() as libc::pid_t;
            if unsafe { libc::kill(pid, libc::SIGTERM) } != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        }
        #[cfg(not(unix))]
        {
            self.child.kill()
        }
    }

    fn try_wait(&mut self) -> io::Result<bool> {
        Ok(self.child.try_wait()?.is_some())
    }

    fn kill(&mut self) -> io::Result<()> {
        self.child.kill()?;
        self.child.wait()?;
        Ok(())
    }
}
