use std::path::Path;

use super::artifact::CatalogEntry;
use archcam_foundation::{extension_of, CatalogError, StorageConfig};

/// Lists the files in `dir` whose extension matches `extension`, with their
/// sizes. The directory is reread on every call and entries keep filesystem
/// enumeration order; callers needing determinism sort the result.
pub fn scan(dir: &Path, extension: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if extension_of(&path).as_deref() != Some(extension) {
            continue;
        }
        let metadata = entry.metadata()?;
        entries.push(CatalogEntry {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path,
            size_bytes: metadata.len(),
        });
    }

    tracing::debug!(
        "Catalog scan of {}: {} .{} file(s)",
        dir.display(),
        entries.len(),
        extension
    );
    Ok(entries)
}

/// Screenshots matching the configured still-image format.
pub fn list_screenshots(config: &StorageConfig) -> Result<Vec<CatalogEntry>, CatalogError> {
    scan(
        &config.screenshots_path(),
        config.image_format.extension(),
    )
}

/// Recordings matching the configured container format.
pub fn list_recordings(config: &StorageConfig) -> Result<Vec<CatalogEntry>, CatalogError> {
    scan(&config.recordings_path(), config.video_format.extension())
}
