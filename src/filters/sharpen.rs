//! Sharpen filter.
//!
//! Convolves with the fixed 5x5 sharpen kernel (see [`Kernel::sharpen5`]).
//! The weighted sum is accumulated in floating point, truncated toward zero
//! and clamped to 0-255. Kernel weights sum to 1, so flat regions are left
//! untouched.

use super::core::{convolve_clamped, Kernel};
use crate::buffer::{clamp_channel, PixelBuffer};
use crate::error::Result;

/// Apply the 5x5 sharpening filter.
///
/// # Arguments
/// * `input` - Source image
///
/// # Returns
/// Sharpened image with same dimensions
pub fn sharpen(input: &PixelBuffer) -> Result<PixelBuffer> {
    convolve_clamped(input, &Kernel::sharpen5(), |sum| clamp_channel(sum as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, pixel: [i32; 3]) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set(y, x, pixel).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_sharpen_uniform_unchanged() {
        for pixel in [[0, 0, 0], [255, 255, 255], [17, 200, 96]] {
            let img = solid(6, 5, pixel);
            assert_eq!(sharpen(&img).unwrap(), img);
        }
    }

    #[test]
    fn test_sharpen_boosts_isolated_pixel() {
        let mut img = PixelBuffer::new(5, 5);
        img.set(2, 2, [100, 100, 100]).unwrap();

        let result = sharpen(&img).unwrap();
        assert_eq!(result.get(2, 2).unwrap(), [100, 100, 100]);
        // Inner ring picks up a quarter of the center
        assert_eq!(result.get(1, 2).unwrap(), [25, 25, 25]);
        // Outer ring goes negative and clamps to 0
        assert_eq!(result.get(0, 0).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_sharpen_clamps_high() {
        // Bright center on a mid-grey background overshoots 255.
        let mut img = solid(5, 5, [200, 200, 200]);
        img.set(2, 2, [255, 255, 255]).unwrap();
        let result = sharpen(&img).unwrap();
        // 200 + 55 * 1.0 = 255 exactly
        assert_eq!(result.get(2, 2).unwrap(), [255, 255, 255]);
        // 200 + 55 * 0.25 = 213.75 -> 213
        assert_eq!(result.get(1, 1).unwrap(), [213, 213, 213]);
    }

    #[test]
    fn test_sharpen_preserves_dimensions() {
        let img = PixelBuffer::new(7, 2);
        let result = sharpen(&img).unwrap();
        assert_eq!((result.width(), result.height()), (7, 2));
    }
}
