//! Orthonormal Haar wavelet transform.
//!
//! The 1D forward transform repeatedly halves the active prefix: pairs are
//! replaced by their scaled average (front half) and scaled difference (back
//! half) until one coefficient remains. The inverse walks the block size
//! back up from 2. Both divide by sqrt(2) at every step, which keeps the
//! transform orthonormal so `inverse(forward(x)) == x` up to rounding.
//!
//! The 2D transform is separable: rows then columns forward, columns then
//! rows inverse. Every pass over one axis completes before the next starts.

use std::f64::consts::SQRT_2;

use ndarray::{Array2, Axis};

use crate::error::{RasterError, Result};

fn check_length(len: usize) -> Result<()> {
    if !len.is_power_of_two() {
        return Err(RasterError::InvalidArgument(format!(
            "wavelet length must be a power of two, got {len}"
        )));
    }
    Ok(())
}

/// Validate that `plane` is square with a power-of-two side.
pub fn check_plane(plane: &Array2<f64>) -> Result<()> {
    let (rows, cols) = plane.dim();
    if rows != cols {
        return Err(RasterError::InvalidArgument(format!(
            "wavelet plane must be square, got {rows}x{cols}"
        )));
    }
    check_length(rows)
}

// ============================================================================
// 1D
// ============================================================================

/// Forward Haar transform in place.
///
/// After the call `seq[0]` holds the overall scaled average and the
/// following entries hold differences at increasing resolution.
pub fn haar_1d(seq: &mut [f64]) -> Result<()> {
    check_length(seq.len())?;

    let mut scratch = vec![0.0f64; seq.len()];
    let mut len = seq.len();

    while len > 1 {
        let half = len / 2;
        for i in (0..len).step_by(2) {
            scratch[i / 2] = (seq[i] + seq[i + 1]) / SQRT_2;
            scratch[half + i / 2] = (seq[i] - seq[i + 1]) / SQRT_2;
        }
        seq[..len].copy_from_slice(&scratch[..len]);
        len = half;
    }

    Ok(())
}

/// Inverse Haar transform in place.
pub fn inverse_haar_1d(seq: &mut [f64]) -> Result<()> {
    check_length(seq.len())?;

    let n = seq.len();
    let mut scratch = vec![0.0f64; n];
    let mut m = 2;

    while m <= n {
        let half = m / 2;
        for i in 0..half {
            let avg = seq[i];
            let diff = seq[half + i];
            scratch[2 * i] = (avg + diff) / SQRT_2;
            scratch[2 * i + 1] = (avg - diff) / SQRT_2;
        }
        seq[..m].copy_from_slice(&scratch[..m]);
        m *= 2;
    }

    Ok(())
}

// ============================================================================
// 2D
// ============================================================================

/// Apply a 1D transform to every lane of `plane` along `axis`.
fn transform_lanes(
    plane: &mut Array2<f64>,
    axis: Axis,
    transform: fn(&mut [f64]) -> Result<()>,
) -> Result<()> {
    let mut buf = Vec::with_capacity(plane.len_of(axis));
    for mut lane in plane.lanes_mut(axis) {
        buf.clear();
        buf.extend(lane.iter().copied());
        transform(&mut buf)?;
        for (dst, &src) in lane.iter_mut().zip(buf.iter()) {
            *dst = src;
        }
    }
    Ok(())
}

/// Forward 2D Haar transform: every row, then every column.
pub fn haar_2d(plane: &mut Array2<f64>) -> Result<()> {
    check_plane(plane)?;
    // Lanes along Axis(1) are rows.
    transform_lanes(plane, Axis(1), haar_1d)?;
    transform_lanes(plane, Axis(0), haar_1d)
}

/// Inverse 2D Haar transform: every column, then every row.
pub fn inverse_haar_2d(plane: &mut Array2<f64>) -> Result<()> {
    check_plane(plane)?;
    transform_lanes(plane, Axis(0), inverse_haar_1d)?;
    transform_lanes(plane, Axis(1), inverse_haar_1d)
}

/// Zero every coefficient whose magnitude is strictly below `cutoff`.
///
/// # Returns
/// Number of zero coefficients in the plane afterwards
pub fn threshold(plane: &mut Array2<f64>, cutoff: f64) -> usize {
    let mut zeros = 0;
    for v in plane.iter_mut() {
        if v.abs() < cutoff {
            *v = 0.0;
        }
        if *v == 0.0 {
            zeros += 1;
        }
    }
    zeros
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_plane(size: usize) -> Array2<f64> {
        Array2::from_shape_fn((size, size), |(y, x)| ((y * 37 + x * 11) % 256) as f64)
    }

    #[test]
    fn test_haar_1d_pair() {
        let mut seq = [3.0, 1.0];
        haar_1d(&mut seq).unwrap();
        assert_abs_diff_eq!(seq[0], 4.0 / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[1], 2.0 / SQRT_2, epsilon = 1e-12);
    }

    #[test]
    fn test_haar_1d_layout() {
        let mut seq = [1.0, 1.0, 1.0, 1.0];
        haar_1d(&mut seq).unwrap();
        // Constant input: everything lands in the overall average.
        assert_abs_diff_eq!(seq[0], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[2], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_haar_1d_roundtrip() {
        let original = [5.0, -2.0, 7.5, 0.25, 100.0, 3.0, 3.0, 9.0];
        let mut seq = original;
        haar_1d(&mut seq).unwrap();
        inverse_haar_1d(&mut seq).unwrap();
        for (a, b) in seq.iter().zip(original.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_haar_1d_single_is_noop() {
        let mut seq = [42.0];
        haar_1d(&mut seq).unwrap();
        inverse_haar_1d(&mut seq).unwrap();
        assert_eq!(seq[0], 42.0);
    }

    #[test]
    fn test_haar_1d_rejects_non_power_of_two() {
        let mut seq = [1.0, 2.0, 3.0];
        assert!(matches!(haar_1d(&mut seq), Err(RasterError::InvalidArgument(_))));
        assert!(matches!(inverse_haar_1d(&mut seq), Err(RasterError::InvalidArgument(_))));
        let mut empty: [f64; 0] = [];
        assert!(haar_1d(&mut empty).is_err());
    }

    #[test]
    fn test_haar_2d_roundtrip() {
        for size in [1, 2, 4, 8, 16] {
            let original = sample_plane(size);
            let mut plane = original.clone();
            haar_2d(&mut plane).unwrap();
            inverse_haar_2d(&mut plane).unwrap();
            for (a, b) in plane.iter().zip(original.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_haar_2d_preserves_energy() {
        let original = sample_plane(8);
        let mut plane = original.clone();
        haar_2d(&mut plane).unwrap();
        let before: f64 = original.iter().map(|v| v * v).sum();
        let after: f64 = plane.iter().map(|v| v * v).sum();
        assert_abs_diff_eq!(before, after, epsilon = 1e-6);
    }

    #[test]
    fn test_haar_2d_rejects_bad_shapes() {
        let mut rect = Array2::<f64>::zeros((4, 8));
        assert!(matches!(haar_2d(&mut rect), Err(RasterError::InvalidArgument(_))));
        let mut odd = Array2::<f64>::zeros((6, 6));
        assert!(matches!(inverse_haar_2d(&mut odd), Err(RasterError::InvalidArgument(_))));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut plane = Array2::from_shape_vec((2, 2), vec![0.5, -0.5, 1.0, -2.0]).unwrap();
        let zeros = threshold(&mut plane, 1.0);
        assert_eq!(zeros, 2);
        // |1.0| is not strictly below 1.0
        assert_eq!(plane[[1, 0]], 1.0);
        assert_eq!(plane[[1, 1]], -2.0);
    }

    #[test]
    fn test_threshold_monotonic() {
        let mut transformed = sample_plane(16);
        haar_2d(&mut transformed).unwrap();

        let mut last = 0;
        for t in [0.0, 0.5, 1.0, 5.0, 20.0, 100.0, 1000.0, 1e9] {
            let mut plane = transformed.clone();
            let zeros = threshold(&mut plane, t);
            assert!(zeros >= last, "threshold {t} zeroed {zeros} < {last}");
            last = zeros;
        }
        assert_eq!(last, 16 * 16);
    }
}
