//! Owned RGB pixel buffer.
//!
//! Pixels are stored as an `ndarray::Array3<i32>` of shape
//! (height, width, 3), addressed as `[[row, col, channel]]`. Channel values
//! are conventionally 0-255 but the storage does not enforce it; every
//! transformation clamps before writing.

use ndarray::{Array3, ArrayView3};

use crate::error::{RasterError, Result};

/// One RGB pixel: `[red, green, blue]`
pub type Pixel = [i32; 3];

/// Number of color channels per pixel
pub const CHANNELS: usize = 3;

/// Color channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index of the channel within a pixel.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Width x height grid of RGB pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Array3<i32>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: Array3::<i32>::zeros((height, width, CHANNELS)),
        }
    }

    /// Wrap an existing (height, width, 3) array.
    pub fn from_array(pixels: Array3<i32>) -> Result<Self> {
        let (height, width, channels) = pixels.dim();
        if channels != CHANNELS {
            return Err(RasterError::InvalidArgument(format!(
                "expected {CHANNELS} channels, got {channels}"
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Number of channel values in a `width` x `height` image.
    ///
    /// Fails with `InvalidArgument` when the count does not fit in `usize`.
    pub fn sample_count(width: usize, height: usize) -> Result<usize> {
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                RasterError::InvalidArgument(format!("image dimensions {width}x{height} overflow"))
            })
    }

    /// Build a buffer from row-major interleaved RGB values.
    pub fn from_raw(width: usize, height: usize, data: Vec<i32>) -> Result<Self> {
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data)
            .map_err(|e| RasterError::InvalidArgument(format!("pixel data: {e}")))?;
        Self::from_array(pixels)
    }

    /// Build a buffer from an 8-bit (height, width, 3) array.
    pub fn from_rgb8(input: ArrayView3<u8>) -> Result<Self> {
        Self::from_array(input.mapv(i32::from))
    }

    /// Export as an 8-bit (height, width, 3) array, clamping to 0-255.
    pub fn to_rgb8(&self) -> Array3<u8> {
        self.pixels.mapv(|v| v.clamp(0, 255) as u8)
    }

    /// Image width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow the underlying (height, width, 3) array.
    #[inline]
    pub fn as_array(&self) -> &Array3<i32> {
        &self.pixels
    }

    /// Consume the buffer and return its array.
    pub fn into_array(self) -> Array3<i32> {
        self.pixels
    }

    /// Read the pixel at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Pixel> {
        self.check_bounds(row, col)?;
        Ok([
            self.pixels[[row, col, 0]],
            self.pixels[[row, col, 1]],
            self.pixels[[row, col, 2]],
        ])
    }

    /// Write the pixel at (row, col). Values are stored as given.
    pub fn set(&mut self, row: usize, col: usize, pixel: Pixel) -> Result<()> {
        self.check_bounds(row, col)?;
        for (c, &v) in pixel.iter().enumerate() {
            self.pixels[[row, col, c]] = v;
        }
        Ok(())
    }

    /// Returns true when the buffer has the same extent as `other`.
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(RasterError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Clamp a channel value to the 8-bit range.
#[inline]
pub fn clamp_channel(v: i32) -> i32 {
    v.clamp(0, 255)
}
