//! PNG encoding with an atomic replace of the output path.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::DynamicImage;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::error::{OgError, OgResult};

/// Encode `image` as PNG and move it into place at `path`.
///
/// The bytes go to a temporary file in the same directory, which is renamed over `path`
/// only after the encoder and the flush succeed. On any error the temporary file is
/// removed and whatever was at `path` before is untouched.
///
/// Returns the size of the written file in bytes.
pub fn write_png_atomic(image: &DynamicImage, path: &Path) -> OgResult<u64> {
    if path.is_dir() {
        return Err(OgError::write(path, "output path is a directory"));
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(OgError::write(
            path,
            format!("directory {} does not exist", parent.display()),
        )
        .with_recovery_suggestion("Create the output directory first"));
    }

    let mut tmp = tempfile::Builder::new()
        .prefix(".og-card-")
        .suffix(".png.tmp")
        .tempfile_in(parent)
        .map_err(|e| OgError::write_io(path, e).with_operation("create_temp"))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        let encoder =
            PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive);
        image
            .write_with_encoder(encoder)
            .map_err(|e| OgError::write(path, e.to_string()).with_operation("encode_png"))?;
        writer
            .flush()
            .map_err(|e| OgError::write_io(path, e).with_operation("flush"))?;
    }

    let file = tmp.as_file();
    file.sync_all()
        .map_err(|e| OgError::write_io(path, e).with_operation("sync"))?;
    let bytes = file
        .metadata()
        .map_err(|e| OgError::write_io(path, e))?
        .len();
    set_public_permissions(file).map_err(|e| OgError::write_io(path, e))?;

    tmp.persist(path)
        .map_err(|e| OgError::write_io(path, e.error).with_operation("rename"))?;
    Ok(bytes)
}

/// Temp files are created 0600; a web asset should be world-readable like any other file.
#[cfg(unix)]
fn set_public_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_public_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
