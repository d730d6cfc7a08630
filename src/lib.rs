//! rasterops
//!
//! In-memory RGB raster transformations with a scriptable command layer,
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `PixelBuffer`s: an ndarray of shape `(height, width, 3)` with
//! `i32` channels. Every transformation writes values clamped to 0-255 and
//! returns a new buffer of the same dimensions; inputs are never mutated.
//!
//! ## Layout
//! - `buffer`: pixel storage and bounds-checked access
//! - `filters`: flips, point operations, grayscale projections, convolution
//! - `compression`: Haar wavelet compression and reconstruction
//! - `model`: `ImageModel`, the facade over filters and compression
//! - `codec`: PPM / PNG / JPEG / BMP load and save
//! - `command`: line-oriented interpreter over named images

pub mod buffer;
pub mod codec;
pub mod command;
pub mod compression;
pub mod error;
pub mod filters;
pub mod model;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::{Channel, Pixel, PixelBuffer};
pub use error::{RasterError, Result};
pub use model::ImageModel;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyIOError, PyIndexError, PyValueError};
    use pyo3::prelude::*;

    use crate::buffer::PixelBuffer;
    use crate::error::RasterError;
    use crate::model::ImageModel;

    impl From<RasterError> for PyErr {
        fn from(e: RasterError) -> Self {
            match e {
                RasterError::InvalidArgument(_) | RasterError::Format(_) => {
                    PyValueError::new_err(e.to_string())
                }
                RasterError::OutOfBounds { .. } => PyIndexError::new_err(e.to_string()),
                RasterError::UnsupportedFormat(_) | RasterError::Io(_) => {
                    PyIOError::new_err(e.to_string())
                }
            }
        }
    }

    fn to_buffer(image: &PyReadonlyArray3<'_, u8>) -> PyResult<PixelBuffer> {
        Ok(PixelBuffer::from_rgb8(image.as_array())?)
    }

    /// Run one facade operation over an `(H, W, 3)` u8 array.
    fn apply<'py, F>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        op: F,
    ) -> PyResult<Bound<'py, PyArray3<u8>>>
    where
        F: FnOnce(&ImageModel, &PixelBuffer) -> crate::Result<PixelBuffer>,
    {
        let input = to_buffer(&image)?;
        let result = op(&ImageModel::new(), &input)?;
        Ok(result.to_rgb8().into_pyarray(py))
    }

    // ========================================================================
    // Geometric
    // ========================================================================

    /// Mirror an RGB image left to right.
    #[pyfunction]
    pub fn flip_horizontal<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.flip_horizontal(Some(i)))
    }

    /// Mirror an RGB image top to bottom.
    #[pyfunction]
    pub fn flip_vertical<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.flip_vertical(Some(i)))
    }

    // ========================================================================
    // Point operations
    // ========================================================================

    /// Add `delta` to every channel, clamped to 0-255.
    ///
    /// # Arguments
    /// * `image` - RGB image (H, W, 3)
    /// * `delta` - Signed increment applied to each channel
    #[pyfunction]
    pub fn brighten<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        delta: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.brighten(Some(i), delta))
    }

    #[pyfunction]
    pub fn sepia<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.sepia(Some(i)))
    }

    /// Rec. 601 weighted grayscale.
    #[pyfunction]
    pub fn greyscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.greyscale(Some(i)))
    }

    #[pyfunction]
    pub fn luma<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.luma(Some(i)))
    }

    /// Mean of the three channels.
    #[pyfunction]
    pub fn intensity<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.intensity(Some(i)))
    }

    /// Maximum of the three channels.
    #[pyfunction]
    pub fn value<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.value(Some(i)))
    }

    #[pyfunction]
    pub fn red_component<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.red_component(Some(i)))
    }

    #[pyfunction]
    pub fn green_component<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.green_component(Some(i)))
    }

    #[pyfunction]
    pub fn blue_component<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.blue_component(Some(i)))
    }

    /// Build an image from the red channel of `red`, green of `green` and
    /// blue of `blue`. Output takes the dimensions of `red`.
    #[pyfunction]
    pub fn combine<'py>(
        py: Python<'py>,
        red: PyReadonlyArray3<'py, u8>,
        green: PyReadonlyArray3<'py, u8>,
        blue: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let (r, g, b) = (to_buffer(&red)?, to_buffer(&green)?, to_buffer(&blue)?);
        let result = ImageModel::new().combine(Some(&r), Some(&g), Some(&b))?;
        Ok(result.to_rgb8().into_pyarray(py))
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    /// 3x3 box blur with edge clamping.
    #[pyfunction]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.blur(Some(i)))
    }

    /// 5x5 sharpen with edge clamping.
    #[pyfunction]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.sharpen(Some(i)))
    }

    // ========================================================================
    // Compression
    // ========================================================================

    /// Haar-compress and reconstruct a square power-of-two image.
    ///
    /// # Arguments
    /// * `image` - RGB image (N, N, 3), N a power of two
    /// * `threshold` - Coefficients with magnitude below this are dropped
    #[pyfunction]
    pub fn compress<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        threshold: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        apply(py, image, |m, i| m.compress(Some(i), threshold))
    }

    /// rasterops extension module
    #[pymodule]
    pub fn rasterops(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Geometric
        m.add_function(wrap_pyfunction!(flip_horizontal, m)?)?;
        m.add_function(wrap_pyfunction!(flip_vertical, m)?)?;

        // Point operations
        m.add_function(wrap_pyfunction!(brighten, m)?)?;
        m.add_function(wrap_pyfunction!(sepia, m)?)?;
        m.add_function(wrap_pyfunction!(greyscale, m)?)?;
        m.add_function(wrap_pyfunction!(luma, m)?)?;
        m.add_function(wrap_pyfunction!(intensity, m)?)?;
        m.add_function(wrap_pyfunction!(value, m)?)?;
        m.add_function(wrap_pyfunction!(red_component, m)?)?;
        m.add_function(wrap_pyfunction!(green_component, m)?)?;
        m.add_function(wrap_pyfunction!(blue_component, m)?)?;
        m.add_function(wrap_pyfunction!(combine, m)?)?;

        // Convolution
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;

        // Compression
        m.add_function(wrap_pyfunction!(compress, m)?)?;

        Ok(())
    }

}

#[cfg(feature = "python")]
pub use python::rasterops;
