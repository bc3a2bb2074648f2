//! Thumbnail generation for uploaded podcast artwork
//!
//! Every upload is rendered to JPEG at each configured size, scaled to fit
//! while preserving aspect ratio and centered on a white canvas so the
//! output dimensions are always exact. The original upload bytes are kept
//! alongside as a backup with their source extension.

use crate::error::{Error, Result};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Thumbnail sizes generated for podcast artwork, keyed by size label
pub const PODCAST_THUMB_SIZES: &[(&str, (u32, u32))] =
    &[("s", (128, 128)), ("m", (160, 160)), ("l", (410, 410))];

/// Path of a generated thumbnail (or original backup) for a podcast.
///
/// Layout: `<images_dir>/podcasts/<id><key>.<ext>`, e.g. `podcasts/3l.jpg`
/// or `podcasts/3orig.png`.
pub fn thumb_path(images_dir: &Path, podcast_id: i64, key: &str, ext: &str) -> PathBuf {
    images_dir
        .join("podcasts")
        .join(format!("{}{}.{}", podcast_id, key, ext))
}

/// Scale an image to fit within `(width, height)` and center it on a white
/// canvas of exactly that size.
pub fn resize_thumb(img: &DynamicImage, (width, height): (u32, u32)) -> RgbImage {
    let scaled = img.resize(width, height, FilterType::Lanczos3).to_rgb8();

    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let x = (width - scaled.width()) / 2;
    let y = (height - scaled.height()) / 2;
    image::imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

/// Write JPEG thumbnails for every configured size
pub fn save_thumbs(images_dir: &Path, podcast_id: i64, img: &DynamicImage) -> Result<()> {
    std::fs::create_dir_all(images_dir.join("podcasts"))?;

    for (key, xy) in PODCAST_THUMB_SIZES {
        let path = thumb_path(images_dir, podcast_id, key, "jpg");
        let thumb = resize_thumb(img, *xy);
        thumb
            .save_with_format(&path, ImageFormat::Jpeg)
            .map_err(|e| Error::Internal(format!("Failed to write thumbnail: {}", e)))?;
        debug!("Wrote thumbnail {}", path.display());
    }
    Ok(())
}

/// Back up the original upload bytes next to the generated thumbnails,
/// keeping the source file extension.
pub fn backup_original(
    images_dir: &Path,
    podcast_id: i64,
    filename: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    std::fs::create_dir_all(images_dir.join("podcasts"))?;

    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "jpg".to_string());

    let path = thumb_path(images_dir, podcast_id, "orig", &ext);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
