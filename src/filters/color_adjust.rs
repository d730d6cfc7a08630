//! Color adjustment filters: Brighten, Sepia.
//!
//! These are pixel-wise operations that don't require spatial context.
//! Every derived channel value is truncated toward zero and clamped to
//! 0-255 before it is stored.

use ndarray::{Array3, Axis, Zip};

use crate::buffer::{clamp_channel, PixelBuffer, CHANNELS};
use crate::error::Result;

// ============================================================================
// Brighten
// ============================================================================

/// Shift every channel by `delta`.
///
/// # Arguments
/// * `input` - Source image
/// * `delta` - Amount added to each channel; negative values darken
///
/// # Returns
/// Adjusted image with each channel clamped to 0-255
pub fn brighten(input: &PixelBuffer, delta: i32) -> Result<PixelBuffer> {
    let output = input
        .as_array()
        .mapv(|v| clamp_channel(v.saturating_add(delta)));
    PixelBuffer::from_array(output)
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia tone matrix, one row per output channel.
const SEPIA: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Apply a sepia tone.
///
/// # Arguments
/// * `input` - Source image
///
/// # Returns
/// Sepia-toned image with same dimensions
pub fn sepia(input: &PixelBuffer) -> Result<PixelBuffer> {
    let src = input.as_array();
    let (height, width, _) = src.dim();
    let mut output = Array3::<i32>::zeros((height, width, CHANNELS));

    Zip::from(output.lanes_mut(Axis(2)))
        .and(src.lanes(Axis(2)))
        .for_each(|mut out, px| {
            let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
            for (c, row) in SEPIA.iter().enumerate() {
                let v = row[0] * r + row[1] * g + row[2] * b;
                out[c] = clamp_channel(v as i32);
            }
        });

    PixelBuffer::from_array(output)
}
