//! Decoded source image.
//!
//! The source is decoded once, converted to 8-bit RGB, and then only read.
//! Transparent pixels are composited over black on the way in, so every
//! tile cut from it is opaque truecolor.

use super::error::ImagingError;
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use std::path::Path;

/// Read-only RGB8 pixel buffer shared by every tile of a run.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// Load and decode an image from disk.
    ///
    /// The format is sniffed from the file contents, not the extension.
    pub fn open(path: &Path) -> Result<Self, ImagingError> {
        let decode_err = |source: image::ImageError| ImagingError::Decode {
            path: path.to_path_buf(),
            source,
        };
        let image = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| decode_err(image::ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;
        Ok(Self::from_dynamic(image))
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            pixels: flatten_on_black(image),
        }
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Side of the square the tile grid is planned over.
    ///
    /// Equal to the width for square sources. For non-square sources the
    /// shorter side keeps every grid region inside the image.
    pub fn dimension(&self) -> u32 {
        self.width().min(self.height())
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Drop the alpha channel, compositing each pixel over black.
fn flatten_on_black(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }
    let rgba = image.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([over_black(r, a), over_black(g, a), over_black(b, a)])
    })
}

#[inline]
fn over_black(channel: u8, alpha: u8) -> u8 {
    ((u16::from(channel) * u16::from(alpha) + 127) / 255) as u8
}
