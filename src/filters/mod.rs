//! Filter modules for RGB image transformations.
//!
//! Every filter takes a `&PixelBuffer` and returns a new buffer of the same
//! dimensions with channels clamped to 0-255. Inputs are never modified.
//!
//! | Module | Operations |
//! |--------|------------|
//! | `geometric` | flip_horizontal, flip_vertical |
//! | `color_adjust` | brighten, sepia |
//! | `grayscale` | greyscale, luma, intensity, value, channel components, combine |
//! | `blur` | 3x3 box blur |
//! | `sharpen` | 5x5 sharpen |
//!
//! `core` holds the shared edge-clamped convolution used by `blur` and
//! `sharpen`. Out-of-range kernel taps read the nearest edge pixel, so a
//! uniform image is a fixed point of both filters.

pub mod core;

pub mod blur;
pub mod color_adjust;
pub mod geometric;
pub mod grayscale;
pub mod sharpen;
