//! Public transformation surface.
//!
//! `ImageModel` is what callers that hold images by name (the command
//! interpreter, bindings) talk to. Its methods take `Option<&PixelBuffer>` so
//! a missing image is reported as `InvalidArgument` before any allocation,
//! then delegate to the filter and compression modules. It never holds
//! image state of its own.

use log::debug;

use crate::buffer::PixelBuffer;
use crate::compression;
use crate::error::{RasterError, Result};
use crate::filters::{blur, color_adjust, geometric, grayscale, sharpen};

fn require(img: Option<&PixelBuffer>) -> Result<&PixelBuffer> {
    img.ok_or_else(RasterError::null_image)
}

/// Stateless facade over the transformation engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageModel;

impl ImageModel {
    pub fn new() -> Self {
        Self
    }

    fn apply<F>(&self, name: &str, img: Option<&PixelBuffer>, op: F) -> Result<PixelBuffer>
    where
        F: FnOnce(&PixelBuffer) -> Result<PixelBuffer>,
    {
        let img = require(img)?;
        debug!("{name} on {}x{} image", img.width(), img.height());
        op(img)
    }

    // ========================================================================
    // Geometric
    // ========================================================================

    pub fn flip_horizontal(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("flip_horizontal", img, geometric::flip_horizontal)
    }

    pub fn flip_vertical(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("flip_vertical", img, geometric::flip_vertical)
    }

    // ========================================================================
    // Point operations
    // ========================================================================

    /// Add `delta` to every channel, clamping to 0-255.
    pub fn brighten(&self, img: Option<&PixelBuffer>, delta: i32) -> Result<PixelBuffer> {
        self.apply("brighten", img, |i| color_adjust::brighten(i, delta))
    }

    pub fn sepia(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("sepia", img, color_adjust::sepia)
    }

    pub fn greyscale(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("greyscale", img, grayscale::greyscale)
    }

    /// Same result as [`ImageModel::greyscale`].
    pub fn luma(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("luma", img, grayscale::luma)
    }

    pub fn intensity(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("intensity", img, grayscale::intensity)
    }

    pub fn value(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("value", img, grayscale::value)
    }

    pub fn red_component(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("red_component", img, grayscale::red_component)
    }

    pub fn green_component(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("green_component", img, grayscale::green_component)
    }

    pub fn blue_component(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("blue_component", img, grayscale::blue_component)
    }

    /// Combine the red, green and blue channels of three images.
    pub fn combine(
        &self,
        red: Option<&PixelBuffer>,
        green: Option<&PixelBuffer>,
        blue: Option<&PixelBuffer>,
    ) -> Result<PixelBuffer> {
        let (red, green, blue) = match (red, green, blue) {
            (Some(r), Some(g), Some(b)) => (r, g, b),
            _ => {
                return Err(RasterError::InvalidArgument(
                    "none of the color images can be null".to_string(),
                ))
            }
        };
        debug!("combine into {}x{} image", red.width(), red.height());
        grayscale::combine(red, green, blue)
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    pub fn blur(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("blur", img, blur::blur)
    }

    pub fn sharpen(&self, img: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        self.apply("sharpen", img, sharpen::sharpen)
    }

    // ========================================================================
    // Compression
    // ========================================================================

    /// Haar-compress with `threshold` and reconstruct the lossy image.
    pub fn compress(&self, img: Option<&PixelBuffer>, threshold: f64) -> Result<PixelBuffer> {
        self.apply("compress", img, |i| compression::compress_roundtrip(i, threshold))
    }
}
