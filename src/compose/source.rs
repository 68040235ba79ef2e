//! Source image loading.

use std::io::ErrorKind;
use std::path::Path;

use image::{ImageReader, RgbaImage};
use og_scale::presets::Size;

use crate::error::{OgError, OgResult};

/// Decoded source logo, always converted to RGBA8.
pub struct SourceImage {
    pub pixels: RgbaImage,
    pub size: Size,
    /// Whether the original color type carried an alpha channel.
    pub has_alpha: bool,
}

/// Decode the image at `path`. The format is sniffed from the content, so a PNG saved
/// with a `.jpg` extension still loads.
pub fn load_source(path: &Path) -> OgResult<SourceImage> {
    if !path.exists() {
        return Err(OgError::not_found(path)
            .with_operation("load_source")
            .with_recovery_suggestion("Check the input path or pass the logo as the first argument"));
    }

    let reader = ImageReader::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => OgError::not_found(path),
        _ => OgError::decode(path, e.to_string()),
    })?;
    let reader = reader
        .with_guessed_format()
        .map_err(|e| OgError::decode(path, e.to_string()))?;
    let decoded = reader.decode().map_err(|e| {
        OgError::decode(path, e.to_string())
            .with_operation("load_source")
            .with_recovery_suggestion("Make sure the file is a complete PNG, JPEG, GIF, WebP or BMP image")
    })?;

    let size = Size {
        w: decoded.width(),
        h: decoded.height(),
    };
    check_dimensions(path, size)?;

    let has_alpha = decoded.color().has_alpha();
    log::debug!(
        "Decoded {} ({}, {:?})",
        path.display(),
        size,
        decoded.color()
    );

    Ok(SourceImage {
        pixels: decoded.into_rgba8(),
        size,
        has_alpha,
    })
}

fn check_dimensions(path: &Path, size: Size) -> OgResult<()> {
    if size.is_empty() {
        return Err(OgError::decode(path, format!("Invalid image dimensions: {}", size))
            .with_operation("load_source"));
    }
    Ok(())
}
