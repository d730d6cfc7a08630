//! Geometric transforms: horizontal and vertical flips.
//!
//! Both are pure pixel permutations; channel values are copied unchanged.

use ndarray::{s, Axis};

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Mirror the image left to right.
///
/// Output pixel (r, c) is input pixel (r, width - 1 - c).
pub fn flip_horizontal(input: &PixelBuffer) -> Result<PixelBuffer> {
    let flipped = input.as_array().slice(s![.., ..;-1, ..]);
    PixelBuffer::from_array(flipped.as_standard_layout().into_owned())
}

/// Mirror the image top to bottom.
///
/// Output pixel (r, c) is input pixel (height - 1 - r, c).
pub fn flip_vertical(input: &PixelBuffer) -> Result<PixelBuffer> {
    let mut flipped = input.as_array().view();
    flipped.invert_axis(Axis(0));
    PixelBuffer::from_array(flipped.as_standard_layout().into_owned())
}
