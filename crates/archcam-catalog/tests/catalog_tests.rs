//! Catalog tests
//!
//! Directory-backed catalog behavior against real temp directories:
//! extension filtering, size metadata, and the screenshot save path.

use archcam_capture::PixelBuffer;
use archcam_catalog::{list_screenshots, save_screenshot, scan, ArtifactKind, NamingPolicy};
use archcam_foundation::{ImageFormat, StorageConfig};
use std::fs;

fn write_file(dir: &std::path::Path, name: &str, len: usize) {
    fs::write(dir.join(name), vec![0u8; len]).expect("write fixture file");
}

#[test]
fn scan_filters_strictly_by_extension() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_file(tmp.path(), "a.png", 10);
    write_file(tmp.path(), "b.png", 20);
    write_file(tmp.path(), "c.jpg", 30);
    write_file(tmp.path(), "notes.txt", 5);

    let pngs = scan(tmp.path(), "png").expect("scan");
    assert_eq!(pngs.len(), 2);
    assert!(pngs.iter().all(|e| e.file_name.ends_with(".png")));

    let jpgs = scan(tmp.path(), "jpg").expect("scan");
    assert_eq!(jpgs.len(), 1);
    assert_eq!(jpgs[0].file_name, "c.jpg");
    assert_eq!(jpgs[0].size_bytes, 30);
}

#[test]
fn scan_skips_subdirectories() {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir(tmp.path().join("nested.png")).expect("mkdir");
    write_file(tmp.path(), "real.png", 1);

    let entries = scan(tmp.path(), "png").expect("scan");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "real.png");
}

#[test]
fn scan_of_missing_directory_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let gone = tmp.path().join("does-not-exist");
    assert!(scan(&gone, "png").is_err());
}

#[test]
fn saved_screenshot_appears_in_listing_and_decodes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = StorageConfig::with_root(tmp.path());
    config.ensure_dirs().expect("ensure_dirs");

    // 3x2 frame with a recognizable first pixel.
    let mut data = vec![0u8; 3 * 2 * 3];
    data[0] = 255;
    let frame = PixelBuffer::packed(3, 2, data).expect("valid shape");

    let mut policy = NamingPolicy::new();
    let name = policy.next(ArtifactKind::Screenshot, config.image_format.extension());
    let artifact = save_screenshot(
        &frame,
        &config.screenshots_path(),
        &name,
        config.image_format,
    )
    .expect("save screenshot");

    assert_eq!(artifact.file_name, "archcam-screenshot1.png");
    assert!(artifact.size_bytes > 0);

    let listed = list_screenshots(&config).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].file_name, artifact.file_name);
    assert_eq!(listed[0].size_bytes, artifact.size_bytes);

    let decoded = image::open(&artifact.path).expect("decodable png");
    assert_eq!(decoded.width(), 3);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.to_rgb8().get_pixel(0, 0).0, [255, 0, 0]);
}

#[test]
fn save_respects_row_padding() {
    let tmp = tempfile::tempdir().expect("tempdir");

    // 1 pixel per row (3 bytes) with stride 4: one padding byte per row.
    let data = vec![1, 2, 3, 99, 4, 5, 6, 99];
    let frame = PixelBuffer::new(1, 2, 4, data).expect("valid shape");

    let artifact = save_screenshot(&frame, tmp.path(), "padded.png", ImageFormat::Png)
        .expect("save screenshot");

    let decoded = image::open(&artifact.path).expect("decodable").to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [1, 2, 3]);
    assert_eq!(decoded.get_pixel(0, 1).0, [4, 5, 6]);
}

#[test]
fn counters_ignore_directory_contents() {
    let tmp = tempfile::tempdir().expect("tempdir");
    // Pre-existing files in the directory do not influence naming.
    write_file(tmp.path(), "archcam-screenshot7.png", 1);

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
