//! Box blur.
//!
//! 3x3 box average with edge-clamped sampling. The integer channel sum is
//! floor-divided by 9, so a uniform image is returned unchanged.

use super::core::{convolve_clamped, Kernel};
use crate::buffer::PixelBuffer;
use crate::error::Result;

/// Number of taps in the 3x3 box kernel
const BOX_TAPS: i64 = 9;

/// Apply a 3x3 box blur.
///
/// # Arguments
/// * `input` - Source image
///
/// # Returns
/// Blurred image with same dimensions
pub fn blur(input: &PixelBuffer) -> Result<PixelBuffer> {
    // All box weights are 1.0, so the sum is an exact integer.
    convolve_clamped(input, &Kernel::box3(), |sum| {
        (sum as i64).div_euclid(BOX_TAPS) as i32
    })
}
