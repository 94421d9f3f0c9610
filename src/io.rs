//! Image file I/O around [`PixelBuffer`].
//!
//! Decoding and encoding go through the `image` crate; the format is picked
//! from the file extension. Buffers are always RGBA8, so alpha round-trips
//! for formats that store it.

use crate::core::error::FiltererError;
use crate::core::types::PixelBuffer;
use std::path::Path;

/// Extensions accepted by [`load_buffer`] and [`save_buffer`].
pub const SUPPORTED_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "bmp", "tiff", "tif", "webp"];

/// Decode an image file into a buffer.
pub fn load_buffer(path: impl AsRef<Path>) -> Result<PixelBuffer, FiltererError> {
    let path = path.as_ref();
    let image = image::open(path)?;
    let buffer = PixelBuffer::from_dynamic_image(&image);
    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

/// Encode a buffer to an image file.
///
/// JPEG cannot store alpha, so the buffer is flattened to RGB for `.jpg`.
pub fn save_buffer(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), FiltererError> {
    let path = path.as_ref();
    let rgba = buffer.to_rgba_image();

    if is_jpeg(path) {
        image::DynamicImage::ImageRgba8(rgba).to_rgb8().save(path)?;
    } else {
        rgba.save(path)?;
    }

    log::debug!("Saved {}", path.display());
    Ok(())
}

/// Whether `path` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: impl AsRef<Path>) -> bool {
    extension(path.as_ref())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn is_jpeg(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("jpg" | "jpeg"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
