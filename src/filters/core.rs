//! Core convolution utilities shared by blur and sharpen.
//!
//! This module provides:
//! - Fixed square kernels (3x3 box, 5x5 sharpen)
//! - Edge-clamped 2D convolution over a `PixelBuffer`
//!
//! Out-of-canvas kernel taps read the nearest edge pixel (no zero padding,
//! no wrap-around). Each channel is convolved independently.

use ndarray::{array, Array2};
use rayon::prelude::*;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{RasterError, Result};

/// Square convolution kernel with an odd side length.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Build a kernel from a square, odd-sized weight matrix.
    pub fn new(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols || rows % 2 == 0 {
            return Err(RasterError::InvalidArgument(format!(
                "kernel must be square with odd size, got {rows}x{cols}"
            )));
        }
        Ok(Self { weights })
    }

    /// 3x3 box kernel of ones.
    pub fn box3() -> Self {
        Self {
            weights: Array2::<f64>::ones((3, 3)),
        }
    }

    /// 5x5 sharpen kernel.
    ///
    /// ```text
    /// -1/8 -1/8 -1/8 -1/8 -1/8
    /// -1/8  1/4  1/4  1/4 -1/8
    /// -1/8  1/4   1   1/4 -1/8
    /// -1/8  1/4  1/4  1/4 -1/8
    /// -1/8 -1/8 -1/8 -1/8 -1/8
    /// ```
    pub fn sharpen5() -> Self {
        Self {
            weights: array![
                [-0.125, -0.125, -0.125, -0.125, -0.125],
                [-0.125, 0.25, 0.25, 0.25, -0.125],
                [-0.125, 0.25, 1.0, 0.25, -0.125],
                [-0.125, 0.25, 0.25, 0.25, -0.125],
                [-0.125, -0.125, -0.125, -0.125, -0.125],
            ],
        }
    }

    /// Side length of the kernel
    #[inline]
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }
}

/// Convolve every channel of `input` with `kernel`, clamping taps to the edge.
///
/// `finish` converts the floating-point weighted sum of one channel into the
/// stored integer value. Rows are computed in parallel: every worker reads
/// the whole input and writes only its own output row.
///
/// # Arguments
/// * `input` - Source buffer (not modified)
/// * `kernel` - Square odd-sized kernel
/// * `finish` - Maps a weighted sum to the output channel value
///
/// # Returns
/// New buffer with the same dimensions as `input`
pub fn convolve_clamped<F>(input: &PixelBuffer, kernel: &Kernel, finish: F) -> Result<PixelBuffer>
where
    F: Fn(f64) -> i32 + Sync,
{
    let (height, width) = (input.height(), input.width());
    if width == 0 || height == 0 {
        return Ok(PixelBuffer::new(width, height));
    }

    let src = input.as_array();
    let weights = kernel.weights();
    let size = kernel.size();
    let half = size / 2;

    let mut data = vec![0i32; height * width * CHANNELS];

    data.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                for c in 0..CHANNELS {
                    let mut sum = 0.0f64;
                    for ki in 0..size {
                        let sy = (y as isize + ki as isize - half as isize)
                            .clamp(0, height as isize - 1) as usize;
                        for kj in 0..size {
                            let sx = (x as isize + kj as isize - half as isize)
                                .clamp(0, width as isize - 1) as usize;
                            sum += src[[sy, sx, c]] as f64 * weights[[ki, kj]];
                        }
                    }
                    row[x * CHANNELS + c] = finish(sum);
                }
            }
        });

    PixelBuffer::from_raw(width, height, data)
}
