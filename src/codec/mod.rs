//! Image file codecs.
//!
//! - `PpmCodec`: plain-text PPM (`P3`)
//! - `StandardCodec`: PNG, JPEG and BMP through the `image` crate
//!
//! `load_image` and `save_image` pick a codec from the file extension.

mod ppm;
mod standard;

pub use ppm::PpmCodec;
pub use standard::StandardCodec;

use std::fs;
use std::path::Path;

use log::info;

use crate::buffer::PixelBuffer;
use crate::error::{RasterError, Result};

/// Reads and writes `PixelBuffer`s in one file format.
pub trait ImageCodec {
    /// Decode the image at `path`.
    fn load(&self, path: &Path) -> Result<PixelBuffer>;

    /// Encode `image` to `path`, replacing any existing file.
    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<()>;
}

/// Select a codec from the (case-insensitive) file extension.
pub fn codec_for_path(path: &Path) -> Result<Box<dyn ImageCodec>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => Ok(Box::new(PpmCodec)),
        "png" | "jpg" | "jpeg" | "bmp" => Ok(Box::new(StandardCodec)),
        _ => Err(RasterError::UnsupportedFormat(format!(
            "{} (extension '{extension}')",
            path.display()
        ))),
    }
}

/// Load an image, dispatching on the file extension.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let codec = codec_for_path(path)?;
    let image = codec.load(path)?;
    info!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Save an image, dispatching on the file extension.
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    let codec = codec_for_path(path)?;
    ensure_parent_dir(path)?;
    codec.save(path, image)?;
    info!(
        "saved {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
