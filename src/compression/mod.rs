//! Lossy Haar-wavelet compression.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   PixelBuffer -> 3 x ChannelPlane -> Haar 2D -> threshold -> CompressedImage
//! decompress: CompressedImage -> inverse Haar 2D -> round + clamp -> PixelBuffer channels
//! ```
//!
//! Planes are square with a power-of-two side; other image shapes are
//! rejected before any transform work. Channels keep their identity on both
//! legs: plane 0 is red, 1 is green, 2 is blue.

pub mod haar;

use log::debug;
use ndarray::Array2;

use crate::buffer::{Channel, PixelBuffer};
use crate::error::{RasterError, Result};

/// Square floating-point plane holding one color channel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelPlane {
    data: Array2<f64>,
}

impl ChannelPlane {
    /// Wrap a square, power-of-two sized array.
    pub fn from_array(data: Array2<f64>) -> Result<Self> {
        haar::check_plane(&data)?;
        Ok(Self { data })
    }

    /// Extract one channel of `image` as a float plane.
    ///
    /// Fails with `InvalidArgument` unless the image is square with a
    /// power-of-two side.
    pub fn from_channel(image: &PixelBuffer, channel: Channel) -> Result<Self> {
        if image.width() != image.height() || !image.width().is_power_of_two() {
            return Err(RasterError::InvalidArgument(format!(
                "compression needs a square power-of-two image, got {}x{}",
                image.width(),
                image.height()
            )));
        }
        let src = image.as_array();
        let c = channel.index();
        let data = Array2::from_shape_fn((image.height(), image.width()), |(y, x)| {
            src[[y, x, c]] as f64
        });
        Ok(Self { data })
    }

    /// Side length of the plane
    pub fn size(&self) -> usize {
        self.data.nrows()
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Forward 2D Haar transform in place.
    pub fn forward(&mut self) -> Result<()> {
        haar::haar_2d(&mut self.data)
    }

    /// Inverse 2D Haar transform in place.
    pub fn inverse(&mut self) -> Result<()> {
        haar::inverse_haar_2d(&mut self.data)
    }

    /// Zero coefficients below `cutoff`; returns the resulting zero count.
    pub fn threshold(&mut self, cutoff: f64) -> usize {
        haar::threshold(&mut self.data, cutoff)
    }

    /// Number of coefficients that are exactly zero.
    pub fn zero_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 0.0).count()
    }

    /// Write the plane into `channel` of `image`, rounding to the nearest
    /// integer and clamping to 0-255.
    pub fn write_channel(&self, image: &mut PixelBuffer, channel: Channel) -> Result<()> {
        let c = channel.index();
        for ((row, col), &v) in self.data.indexed_iter() {
            let mut pixel = image.get(row, col)?;
            pixel[c] = v.round().clamp(0.0, 255.0) as i32;
            image.set(row, col, pixel)?;
        }
        Ok(())
    }
}

/// Thresholded wavelet coefficients for the three channels of one image.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressedImage {
    width: usize,
    height: usize,
    threshold: f64,
    planes: [ChannelPlane; 3],
}

impl CompressedImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Threshold used during compression
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Coefficient plane for `channel`.
    pub fn plane(&self, channel: Channel) -> &ChannelPlane {
        &self.planes[channel.index()]
    }

    /// Zero coefficients across all three planes.
    pub fn zeroed_coefficients(&self) -> usize {
        self.planes.iter().map(ChannelPlane::zero_count).sum()
    }

    /// Total number of coefficients across all three planes.
    pub fn total_coefficients(&self) -> usize {
        self.planes.iter().map(|p| p.data().len()).sum()
    }
}

fn check_threshold(threshold: f64) -> Result<()> {
    if threshold.is_nan() {
        return Err(RasterError::InvalidArgument(
            "threshold must be a number, got NaN".to_string(),
        ));
    }
    Ok(())
}

/// Transform and threshold each channel of `image`.
///
/// # Arguments
/// * `image` - Square image with a power-of-two side
/// * `threshold` - Coefficients with magnitude strictly below this are zeroed
pub fn compress(image: &PixelBuffer, threshold: f64) -> Result<CompressedImage> {
    check_threshold(threshold)?;

    let mut planes = [
        ChannelPlane::from_channel(image, Channel::Red)?,
        ChannelPlane::from_channel(image, Channel::Green)?,
        ChannelPlane::from_channel(image, Channel::Blue)?,
    ];

    for plane in planes.iter_mut() {
        plane.forward()?;
        plane.threshold(threshold);
    }

    let compressed = CompressedImage {
        width: image.width(),
        height: image.height(),
        threshold,
        planes,
    };
    debug!(
        "compress {}x{} threshold={} zeroed {}/{} coefficients",
        compressed.width,
        compressed.height,
        threshold,
        compressed.zeroed_coefficients(),
        compressed.total_coefficients()
    );
    Ok(compressed)
}

/// Reconstruct `compressed` into the channels of `target`.
///
/// `target` must have the same dimensions as the compressed image.
pub fn decompress(compressed: &CompressedImage, target: &mut PixelBuffer) -> Result<()> {
    if target.width() != compressed.width || target.height() != compressed.height {
        return Err(RasterError::InvalidArgument(format!(
            "cannot decompress a {}x{} image into a {}x{} buffer",
            compressed.width,
            compressed.height,
            target.width(),
            target.height()
        )));
    }

    for channel in Channel::ALL {
        let mut plane = compressed.plane(channel).clone();
        plane.inverse()?;
        plane.write_channel(target, channel)?;
    }
    Ok(())
}

/// Compress and immediately reconstruct, returning the lossy result.
pub fn compress_roundtrip(image: &PixelBuffer, threshold: f64) -> Result<PixelBuffer> {
    let compressed = compress(image, threshold)?;
    let mut output = image.clone();
    decompress(&compressed, &mut output)?;
    Ok(output)
}
