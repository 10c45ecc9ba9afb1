//! Raw and encoded frame buffers.

use std::io::Cursor;

use image::{imageops, ImageFormat, RgbImage};

use super::MediaError;

/// A packed RGB8 snapshot of the asset's displayed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RawFrame {
    /// Wrap a packed RGB8 buffer, validating its length.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, MediaError> {
        if width == 0 || height == 0 {
            return Err(MediaError::EmptyFrame);
        }
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(MediaError::BadFrameSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A frame filled with a single colour.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, MediaError> {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::from_rgb(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A still frame scaled down and encoded as PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    width: u32,
    height: u32,
    png: Vec<u8>,
    swatch: [u8; 3],
}

impl EncodedImage {
    /// Scale `frame` to `width`x`height` and encode it as PNG.
    pub fn encode_thumbnail(
        frame: &RawFrame,
        width: u32,
        height: u32,
    ) -> Result<Self, image::ImageError> {
        let source = RgbImage::from_raw(frame.width, frame.height, frame.pixels.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        let scaled = imageops::thumbnail(&source, width.max(1), height.max(1));

        let mut png = Vec::new();
        scaled.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Self {
            width: scaled.width(),
            height: scaled.height(),
            swatch: mean_colour(&scaled),
            png,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encoded PNG bytes.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Mean colour of the scaled frame, used where pixels can't be shown.
    pub fn swatch(&self) -> [u8; 3] {
        self.swatch
    }
}

fn mean_colour(image: &RgbImage) -> [u8; 3] {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return [0, 0, 0];
    }
    let mut sums = [0u64; 3];
    for pixel in image.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }
    sums.map(|sum| ((sum + count / 2) / count) as u8)
}
