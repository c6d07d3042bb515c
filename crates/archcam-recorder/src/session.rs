use parking_lot::Mutex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::encoder::{Encoder, EncoderChild};
use super::probe::DurationProbe;
use archcam_catalog::{list_recordings, ArtifactKind, NamingPolicy, RecordingArtifact};
use archcam_foundation::{RecorderError, SharedClock, StorageConfig};

const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How the encoder process ended during `stop()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Exited on its own or after the graceful signal.
    Graceful,
    /// Did not exit within the stop timeout and was force-killed.
    TimedOut,
}

#[derive(Debug)]
pub enum StartOutcome {
    Started { file_name: String },
    /// A session was already running; nothing was spawned.
    AlreadyRecording,
}

#[derive(Debug)]
pub enum StopOutcome {
    Stopped {
        artifact: RecordingArtifact,
        termination: Termination,
    },
    /// No session was running; no process operations occurred.
    NotRecording,
}

enum SessionState {
    Idle,
    Recording {
        child: Box<dyn EncoderChild>,
        file_name: String,
        path: PathBuf,
    },
}

/// Supervises the lifecycle of at most one recording.
///
/// State machine: `Idle --start--> Recording --stop--> Idle`, with no other
/// transitions. `start` while `Recording` and `stop` while `Idle` are
/// reported no-ops. One instance exists per process; all mutation goes
/// through the session lock, so concurrent callers cannot race two encoder
/// processes into existence.
pub struct RecordingManager {
    encoder: Arc<dyn Encoder>,
    probe: Arc<dyn DurationProbe>,
    storage: StorageConfig,
    naming: Arc<Mutex<NamingPolicy>>,
    clock: SharedClock,
    stop_timeout: Duration,
    state: Mutex<SessionState>,
}

impl RecordingManager {
    pub fn new(
        encoder: Arc<dyn Encoder>,
        probe: Arc<dyn DurationProbe>,
        storage: StorageConfig,
        naming: Arc<Mutex<NamingPolicy>>,
        clock: SharedClock,
        stop_timeout: Duration,
    ) -> Self {
        Self {
            encoder,
            probe,
            storage,
            naming,
            clock,
            stop_timeout,
            state: Mutex::new(SessionState::Idle),
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(*self.state.lock(), SessionState::Recording { .. })
    }

    /// Spawns the encoder against a fresh default filename. On spawn
    /// failure the state remains `Idle` and the error surfaces to the
    /// caller, since no file was produced.
    pub fn start(&self) -> Result<StartOutcome, RecorderError> {
        let mut state = self.state.lock();
        if matches!(*state, SessionState::Recording { .. }) {
            tracing::info!("Recording already in progress");
            return Ok(StartOutcome::AlreadyRecording);
        }

        let file_name = self
            .naming
            .lock()
            .next(ArtifactKind::Recording, self.storage.video_format.extension());
        let path = self.storage.recordings_path().join(&file_name);

        let child = self.encoder.spawn(&path)?;
        tracing::info!("Recording started: {}", file_name);

        *state = SessionState::Recording {
            child,
            file_name: file_name.clone(),
            path,
        };
        Ok(StartOutcome::Started { file_name })
    }

    /// Winds the session down and reports what landed on disk.
    ///
    /// This is the one call permitted to block, bounded by the stop
    /// timeout. The encoder is asked to exit gracefully and force-killed on
    /// expiry; an already-exited process (e.g. killed externally) is
    /// detected and completes the stop normally. Metadata extraction
    /// failures degrade the artifact instead of failing the operation.
    pub fn stop(&self) -> StopOutcome {
        let mut state = self.state.lock();
        let SessionState::Recording {
            mut child,
            file_name,
            path,
        } = std::mem::replace(&mut *state, SessionState::Idle)
        else {
            tracing::info!("Stop requested with no recording in progress");
            return StopOutcome::NotRecording;
        };

        let termination = self.shut_down(child.as_mut());
        tracing::info!("Recording stopped: {} ({:?})", file_name, termination);

        let duration_secs = self.probe.duration_secs(&path);
        if duration_secs.is_none() {
            tracing::warn!("Duration unknown for {}", path.display());
        }
        let size_bytes = match std::fs::metadata(&path) {
            Ok(m) => m.len(),
            Err(e) => {
                tracing::warn!("Could not stat {}: {}", path.display(), e);
                0
            }
        };

        // The directory is the index; reread it now that a file landed.
        match list_recordings(&self.storage) {
            Ok(entries) => {
                tracing::debug!("Recordings catalog now holds {} file(s)", entries.len())
            }
            Err(e) => tracing::warn!("Catalog rescan failed: {}", e),
        }

        StopOutcome::Stopped {
            artifact: RecordingArtifact {
                file_name,
                path,
                format: self.storage.video_format,
                size_bytes,
                duration_secs,
            },
            termination,
        }
    }

    fn shut_down(&self, child: &mut dyn EncoderChild) -> Termination {
        // Already gone, e.g. killed externally: nothing to signal.
        match child.try_wait() {
            Ok(true) => return Termination::Graceful,
            Ok(false) => {}
            Err(e) => tracing::warn!("try_wait on encoder failed: {}", e),
        }

        if let Err(e) = child.terminate() {
            tracing::debug!("Graceful signal failed (process may have exited): {}", e);
        }

        let deadline = self.clock.now() + self.stop_timeout;
        loop {
            match child.try_wait() {
                Ok(true) => return Termination::Graceful,
                Ok(false) => {}
                Err(e) => tracing::warn!("try_wait on encoder failed: {}", e),
            }
            if self.clock.now() >= deadline {
                tracing::warn!(
                    "Encoder did not exit within {:?}; killing",
                    self.stop_timeout
                );
                if let Err(e) = child.kill() {
                    tracing::error!("Failed to kill encoder: {}", e);
                }
                return Termination::TimedOut;
            }
            self.clock.sleep(EXIT_POLL_INTERVAL);
        }
    }
}

impl Drop for RecordingManager {
    fn drop(&mut self) {
        // Owners stop the session before teardown; this is the last-resort
        // reaper so no encoder process outlives the manager.
        if let SessionState::Recording {
            child, file_name, ..
        } = self.state.get_mut()
        {
            tracing::warn!(
                "Recording {} still active at teardown; killing encoder",
                file_name
            );
            let _ = child.terminate();
            if let Err(e) = child.kill() {
                tracing::error!("Failed to kill encoder during teardown: {}", e);
            }
        }
    }
}
