//! Grayscale projections and channel operations.
//!
//! Every projection writes the same value into all three channels:
//! - **greyscale / luma**: Rec. 601 weights `0.299 R + 0.587 G + 0.114 B`
//! - **intensity**: integer mean `(R + G + B) / 3`
//! - **value**: `max(R, G, B)`
//! - **red / green / blue component**: the selected source channel
//!
//! `combine` goes the other way and assembles one image from three sources.

use ndarray::{Array3, Axis, Zip};

use crate::buffer::{clamp_channel, Channel, PixelBuffer, CHANNELS};
use crate::error::Result;

/// Rec. 601 luma coefficients
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Map each pixel to a single value and replicate it across channels.
fn project<F>(input: &PixelBuffer, f: F) -> Result<PixelBuffer>
where
    F: Fn(i32, i32, i32) -> i32,
{
    let src = input.as_array();
    let (height, width, _) = src.dim();
    let mut output = Array3::<i32>::zeros((height, width, CHANNELS));

    Zip::from(output.lanes_mut(Axis(2)))
        .and(src.lanes(Axis(2)))
        .for_each(|mut out, px| {
            out.fill(f(px[0], px[1], px[2]));
        });

    PixelBuffer::from_array(output)
}

// ============================================================================
// Luminance projections
// ============================================================================

/// Convert to greyscale with Rec. 601 weights, truncating toward zero.
pub fn greyscale(input: &PixelBuffer) -> Result<PixelBuffer> {
    project(input, |r, g, b| {
        let v = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
        clamp_channel(v as i32)
    })
}

/// Luma projection. Same formula as [`greyscale`].
pub fn luma(input: &PixelBuffer) -> Result<PixelBuffer> {
    greyscale(input)
}

/// Integer mean of the three channels (floor division).
pub fn intensity(input: &PixelBuffer) -> Result<PixelBuffer> {
    project(input, |r, g, b| {
        let sum = r as i64 + g as i64 + b as i64;
        sum.div_euclid(3).clamp(0, 255) as i32
    })
}

/// Maximum of the three channels.
pub fn value(input: &PixelBuffer) -> Result<PixelBuffer> {
    project(input, |r, g, b| clamp_channel(r.max(g).max(b)))
}

// ============================================================================
// Channel isolation
// ============================================================================

/// Replicate one source channel across all three output channels.
pub fn channel_component(input: &PixelBuffer, channel: Channel) -> Result<PixelBuffer> {
    project(input, |r, g, b| match channel {
        Channel::Red => r,
        Channel::Green => g,
        Channel::Blue => b,
    })
}

pub fn red_component(input: &PixelBuffer) -> Result<PixelBuffer> {
    channel_component(input, Channel::Red)
}

pub fn green_component(input: &PixelBuffer) -> Result<PixelBuffer> {
    channel_component(input, Channel::Green)
}

pub fn blue_component(input: &PixelBuffer) -> Result<PixelBuffer> {
    channel_component(input, Channel::Blue)
}

/// Assemble an image from the red channel of `red`, the green channel of
/// `green` and the blue channel of `blue`.
///
/// The output takes the dimensions of `red`. The other two sources are read
/// through the bounds-checked accessor, so a smaller `green` or `blue`
/// surfaces as `OutOfBounds`.
pub fn combine(red: &PixelBuffer, green: &PixelBuffer, blue: &PixelBuffer) -> Result<PixelBuffer> {
    let mut output = PixelBuffer::new(red.width(), red.height());
    for row in 0..red.height() {
        for col in 0..red.width() {
            let r = red.get(row, col)?[Channel::Red.index()];
            let g = green.get(row, col)?[Channel::Green.index()];
            let b = blue.get(row, col)?[Channel::Blue.index()];
            output.set(row, col, [r, g, b])?;
        }
    }
    Ok(output)
}
