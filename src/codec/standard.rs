//! Compressed raster formats handled by the `image` crate.
//!
//! Images are decoded to 8-bit RGB with a top-left origin; alpha and higher
//! bit depths are dropped by the conversion. The output format is chosen
//! from the path extension.

use std::path::Path;

use image::RgbImage;

use super::ImageCodec;
use crate::buffer::PixelBuffer;
use crate::error::{RasterError, Result};

/// PNG / JPEG / BMP codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCodec;

impl ImageCodec for StandardCodec {
    fn load(&self, path: &Path) -> Result<PixelBuffer> {
        let img = image::open(path)?.into_rgb8();
        let (width, height) = (img.width() as usize, img.height() as usize);
        let data = img.into_raw().into_iter().map(i32::from).collect();
        PixelBuffer::from_raw(width, height, data)
    }

    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<()> {
        let bytes = image.to_rgb8().iter().copied().collect::<Vec<u8>>();
        let out = RgbImage::from_raw(image.width() as u32, image.height() as u32, bytes)
            .ok_or_else(|| {
                RasterError::InvalidArgument(format!(
                    "cannot encode a {}x{} image",
                    image.width(),
                    image.height()
                ))
            })?;
        out.save(path)?;
        Ok(())
    }
}
