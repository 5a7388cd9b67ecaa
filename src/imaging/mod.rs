//! Pixel work: decode, resample, encode. Pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** (PNG, JPEG) | `image::ImageReader` with content sniffing |
//! | **Flatten alpha** | composite over black, see [`source`] |
//! | **Crop** | `image::imageops::crop_imm` |
//! | **Resample** | `image::imageops::resize` with the configured [`ResampleFilter`] |
//! | **Encode** | `PngEncoder` / `JpegEncoder` |
//!
//! The module is split into:
//! - **Source**: [`SourceImage`], the read-only decoded input
//! - **Parameters**: tile size, JPEG quality, resampling filter
//! - **Resample**: [`extract_tile`], region → fixed-size tile
//! - **Writer**: [`TileWriter`] trait + [`FsTileWriter`]

mod error;
mod params;
pub mod resample;
pub mod source;
pub mod writer;

pub use error::ImagingError;
pub use params::{Quality, ResampleFilter, TILE_SIZE};
pub use resample::{OutputTile, extract_tile};
pub use source::SourceImage;
pub use writer::{FsTileWriter, TileWriter};
