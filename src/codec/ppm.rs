//! Plain-text PPM (`P3`).
//!
//! Layout: magic `P3`, width, height, max value, then `3 * width * height`
//! decimal channel values. Tokens are whitespace separated and `#` starts a
//! comment that runs to the end of the line. Files are written with one
//! channel value per line.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::ImageCodec;
use crate::buffer::{clamp_channel, PixelBuffer, CHANNELS};
use crate::error::{RasterError, Result};

const MAGIC: &str = "P3";
const MAX_VALUE: i32 = 255;

/// Plain-text PPM codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct PpmCodec;

impl ImageCodec for PpmCodec {
    fn load(&self, path: &Path) -> Result<PixelBuffer> {
        let text = fs::read_to_string(path)?;
        parse_ppm(&text)
    }

    fn save(&self, path: &Path, image: &PixelBuffer) -> Result<()> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_ppm(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }
}

/// Parse PPM text into a buffer.
pub fn parse_ppm(text: &str) -> Result<PixelBuffer> {
    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some(MAGIC) => {}
        Some(other) => {
            return Err(RasterError::Format(format!(
                "unsupported PPM magic '{other}', expected {MAGIC}"
            )))
        }
        None => return Err(RasterError::Format("empty PPM file".to_string())),
    }

    let mut next_number = |what: &str| -> Result<i64> {
        let token = tokens
            .next()
            .ok_or_else(|| RasterError::Format(format!("PPM truncated before {what}")))?;
        token
            .parse::<i64>()
            .map_err(|_| RasterError::Format(format!("invalid PPM {what} '{token}'")))
    };

    let width = next_number("width")?;
    let height = next_number("height")?;
    let max_value = next_number("max value")?;
    if width < 0 || height < 0 {
        return Err(RasterError::Format(format!(
            "invalid PPM dimensions {width}x{height}"
        )));
    }
    if !(1..=65535).contains(&max_value) {
        return Err(RasterError::Format(format!(
            "invalid PPM max value {max_value}"
        )));
    }

    let (width, height) = (width as usize, height as usize);
    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| RasterError::Format("PPM dimensions overflow".to_string()))?;

    // Every value takes at least two bytes of text, whatever the header claims.
    let mut data = Vec::with_capacity(count.min(text.len() / 2));
    for _ in 0..count {
        let v = next_number("pixel data")?.clamp(0, max_value);
        // Rescale to 8 bits when the file uses another max value.
        let v = if max_value == MAX_VALUE as i64 {
            v
        } else {
            v * MAX_VALUE as i64 / max_value
        };
        data.push(v as i32);
    }

    PixelBuffer::from_raw(width, height, data)
}

/// Write `image` as PPM text, clamping channels to 0-255.
pub fn write_ppm<W: Write>(writer: &mut W, image: &PixelBuffer) -> Result<()> {
    writeln!(writer, "{MAGIC}")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "{MAX_VALUE}")?;
    for &v in image.as_array().iter() {
        writeln!(writer, "{}", clamp_channel(v))?;
    }
    Ok(())
}
