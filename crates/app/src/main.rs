use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

use archcam_capture::{CaptureThread, FrameSource, LatestFrameSlot, PrimaryDisplay};
use archcam_catalog::{
    list_recordings, list_screenshots, save_screenshot, ArtifactKind, NamingPolicy,
};
use archcam_foundation::{
    system_clock, CaptureConfig, EncoderConfig, ImageFormat, StorageConfig,
};
use archcam_recorder::{
    open_with_default_app, FfmpegEncoder, FfprobeDuration, RecordingManager, StartOutcome,
    StopOutcome, Termination,
};
use archcam_telemetry::CaptureMetrics;

#[derive(Parser)]
#[command(name = "archcam", about = "Full-screen capture and recording")]
struct Cli {
    /// Root directory holding Screenshots/ and Recordings/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Still-image output format
    #[arg(long, value_enum, default_value = "png")]
    format: FormatArg,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Jpg,
    Bmp,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpg => ImageFormat::Jpg,
            FormatArg::Bmp => ImageFormat::Bmp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Screenshots,
    Recordings,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Capture one screenshot of the primary display
    Shot,
    /// Record the primary display until Ctrl-C, or for a fixed duration
    Record {
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// List catalog entries as JSON
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
    /// Run the continuous capture loop and report its frame rate
    Monitor {
        #[arg(long, default_value_t = 5)]
        seconds: u64,
    },
    /// Open a recording with the default video player
    Preview { file: String },
}

fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "archcam.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr.and(non_blocking_file))
        .with_env_filter(log_level)
        .init();
    std::mem::forget(guard);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let storage = StorageConfig {
        root: cli.root.clone(),
        image_format: cli.format.into(),
        ..Default::default()
    };
    storage
        .ensure_dirs()
        .context("create artifact directories")?;
    let naming = Arc::new(Mutex::new(NamingPolicy::new()));

    match cli.command {
        CliCommand::Shot => shot(&storage, &naming),
        CliCommand::Record { seconds } => record(storage, naming, seconds).await,
        CliCommand::List { kind } => list(&storage, kind),
        CliCommand::Monitor { seconds } => monitor(seconds).await,
        CliCommand::Preview { file } => preview(&storage, &file),
    }
}

fn shot(storage: &StorageConfig, naming: &Arc<Mutex<NamingPolicy>>) -> anyhow::Result<()> {
    let frame = PrimaryDisplay::new()
        .capture()
        .context("capture primary display")?;
    let name = naming
        .lock()
        .next(ArtifactKind::Screenshot, storage.image_format.extension());
    let artifact = save_screenshot(
        &frame,
        &storage.screenshots_path(),
        &name,
        storage.image_format,
    )?;
    println!("{}", serde_json::to_string_pretty(&artifact)?);
    Ok(())
}

async fn record(
    storage: StorageConfig,
    naming: Arc<Mutex<NamingPolicy>>,
    seconds: Option<u64>,
) -> anyhow::Result<()> {
    let encoder_config = EncoderConfig::default();
    let stop_timeout = encoder_config.stop_timeout;
    let manager = Arc::new(RecordingManager::new(
        Arc::new(FfmpegEncoder::new(encoder_config)),
        Arc::new(FfprobeDuration),
        storage,
        naming,
        system_clock(),
        stop_timeout,
    ));

    match manager.start().context("start recording")? {
        StartOutcome::Started { file_name } => {
            tracing::info!("Recording to {}", file_name);
        }
        StartOutcome::AlreadyRecording => {
            tracing::info!("Recording already in progress");
            return Ok(());
        }
    }

    match seconds {
        Some(s) => tokio::time::sleep(Duration::from_secs(s)).await,
        None => {
            tracing::info!("Recording; press Ctrl-C to stop");
            tokio::signal::ctrl_c().await.context("wait for Ctrl-C")?;
        }
    }

    // stop() blocks up to the stop timeout; keep it off the runtime threads.
    let stopper = manager.clone();
    let outcome = tokio::task::spawn_blocking(move || stopper.stop()).await?;
    match outcome {
        StopOutcome::Stopped {
            artifact,
            termination,
        } => {
            if termination == Termination::TimedOut {
                tracing::warn!("Encoder did not exit gracefully and was killed");
            }
            println!("{}", serde_json::to_string_pretty(&artifact)?);
        }
        StopOutcome::NotRecording => tracing::info!("No recording in progress"),
    }
    Ok(())
}

fn list(storage: &StorageConfig, kind: ListKind) -> anyhow::Result<()> {
    let entries = match kind {
        ListKind::Screenshots => list_screenshots(storage)?,
        ListKind::Recordings => list_recordings(storage)?,
    };
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

async fn monitor(seconds: u64) -> anyhow::Result<()> {
    let slot = Arc::new(LatestFrameSlot::new());
    let metrics = CaptureMetrics::default();
    let thread = CaptureThread::spawn(
        PrimaryDisplay::new(),
        slot.clone(),
        CaptureConfig::default(),
        metrics.clone(),
        system_clock(),
    )
    .context("start capture loop")?;

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;
    for _ in 0..seconds {
        ticker.tick().await;
        let snap = metrics.snapshot();
        let latest = slot
            .take()
            .map(|f| format!("{}x{}", f.width(), f.height()))
            .unwrap_or_else(|| "none".to_string());
        tracing::info!(
            "capture: {:.1} fps, {} frames, {} errors, latest frame {}",
            snap.fps,
            snap.frames_captured,
            snap.capture_errors,
            latest
        );
    }

    tokio::task::spawn_blocking(move || thread.stop()).await?;
    Ok(())
}

fn preview(storage: &StorageConfig, file: &str) -> anyhow::Result<()> {
    let path = storage.recordings_path().join(file);
    open_with_default_app(&path).with_context(|| format!("open {}", path.display()))?;
    Ok(())
}
