use std::path::Path;

use super::artifact::ScreenshotArtifact;
use archcam_capture::PixelBuffer;
use archcam_foundation::{CatalogError, ImageFormat};
use image::RgbImage;

/// Encodes a captured frame into `dir/file_name` using the requested still
/// format and returns the resulting artifact with its on-disk size.
pub fn save_screenshot(
    frame: &PixelBuffer,
    dir: &Path,
    file_name: &str,
    format: ImageFormat,
) -> Result<ScreenshotArtifact, CatalogError> {
    let width = frame.width();
    let height = frame.height();

    // Repack row by row; the frame's stride may carry trailing padding the
    // encoder must not see.
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        pixels.extend_from_slice(frame.row(y));
    }

    let image = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| CatalogError::Encode("frame payload does not match its geometry".into()))?;

    let path = dir.join(file_name);
    image
        .save_with_format(&path, encoded_format(format))
        .map_err(|e| CatalogError::Encode(e.to_string()))?;

    let size_bytes = std::fs::metadata(&path)?.len();
    tracing::info!("Screenshot saved: {}", path.display());

    Ok(ScreenshotArtifact {
        file_name: file_name.to_string(),
        path,
        format,
        size_bytes,
    })
}

fn encoded_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpg => image::ImageFormat::Jpeg,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    }
}
