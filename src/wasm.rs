//! WebAssembly exports for rasterops.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! Images cross the boundary as flat RGB bytes (length = width * height * 3),
//! row-major with a top-left origin. Invalid dimensions or failed
//! preconditions come back as a thrown JS `Error`.

use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::model::ImageModel;

fn decode(data: &[u8], width: usize, height: usize) -> Result<PixelBuffer, JsError> {
    let expected = PixelBuffer::sample_count(width, height)?;
    if data.len() != expected {
        return Err(JsError::new(&format!(
            "expected {expected} bytes for a {width}x{height} RGB image, got {}",
            data.len()
        )));
    }
    let values = data.iter().copied().map(i32::from).collect();
    Ok(PixelBuffer::from_raw(width, height, values)?)
}

fn encode(image: PixelBuffer) -> Vec<u8> {
    image.to_rgb8().into_raw_vec_and_offset().0
}

fn apply<F>(data: &[u8], width: usize, height: usize, op: F) -> Result<Vec<u8>, JsError>
where
    F: FnOnce(&ImageModel, &PixelBuffer) -> crate::Result<PixelBuffer>,
{
    let input = decode(data, width, height)?;
    let result = op(&ImageModel::new(), &input)?;
    Ok(encode(result))
}

// ============================================================================
// Geometric
// ============================================================================

#[wasm_bindgen]
pub fn flip_horizontal_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.flip_horizontal(Some(i)))
}

#[wasm_bindgen]
pub fn flip_vertical_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.flip_vertical(Some(i)))
}

// ============================================================================
// Point operations
// ============================================================================

/// Add `delta` to every channel.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `delta` - Signed increment, result clamped to 0-255
///
/// # Returns
/// Flat array of RGB bytes
#[wasm_bindgen]
pub fn brighten_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    delta: i32,
) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.brighten(Some(i), delta))
}

#[wasm_bindgen]
pub fn sepia_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.sepia(Some(i)))
}

#[wasm_bindgen]
pub fn greyscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.greyscale(Some(i)))
}

/// Same result as `greyscale_wasm`.
#[wasm_bindgen]
pub fn luma_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.luma(Some(i)))
}

#[wasm_bindgen]
pub fn intensity_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.intensity(Some(i)))
}

#[wasm_bindgen]
pub fn value_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.value(Some(i)))
}

#[wasm_bindgen]
pub fn red_component_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.red_component(Some(i)))
}

#[wasm_bindgen]
pub fn green_component_wasm(
    data: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.green_component(Some(i)))
}

#[wasm_bindgen]
pub fn blue_component_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.blue_component(Some(i)))
}

/// Combine the red, green and blue channels of three same-sized images.
///
/// # Arguments
/// * `red` - Flat RGB bytes supplying the red channel
/// * `green` - Flat RGB bytes supplying the green channel
/// * `blue` - Flat RGB bytes supplying the blue channel
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen]
pub fn combine_wasm(
    red: &[u8],
    green: &[u8],
    blue: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsError> {
    let r = decode(red, width, height)?;
    let g = decode(green, width, height)?;
    let b = decode(blue, width, height)?;
    let result = ImageModel::new().combine(Some(&r), Some(&g), Some(&b))?;
    Ok(encode(result))
}

// ============================================================================
// Convolution
// ============================================================================

#[wasm_bindgen]
pub fn blur_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.blur(Some(i)))
}

#[wasm_bindgen]
pub fn sharpen_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.sharpen(Some(i)))
}

// ============================================================================
// Compression
// ============================================================================

/// Haar-compress and reconstruct. `width` must equal `height` and be a
/// power of two.
#[wasm_bindgen]
pub fn compress_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold: f64,
) -> Result<Vec<u8>, JsError> {
    apply(data, width, height, |m, i| m.compress(Some(i), threshold))
}
