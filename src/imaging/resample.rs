//! Cut one grid region out of the source and scale it to the tile size.
//!
//! Regions larger than [`TILE_SIZE`] are scaled down, smaller ones are scaled
//! up, and regions that already match are copied through untouched.

use super::error::ImagingError;
use super::params::{ResampleFilter, TILE_SIZE};
use super::source::SourceImage;
use crate::grid::SourceRegion;
use image::{RgbImage, imageops};

/// A finished `TILE_SIZE × TILE_SIZE` RGB8 tile.
pub type OutputTile = RgbImage;

/// Extract `region` from `source` and resample it to a `TILE_SIZE` square.
pub fn extract_tile(
    source: &SourceImage,
    region: SourceRegion,
    filter: ResampleFilter,
) -> Result<OutputTile, ImagingError> {
    let (width, height) = (source.width(), source.height());
    if region.width == 0 || region.height == 0 || !region.fits_within(width, height) {
        return Err(ImagingError::OutOfBounds {
            region,
            width,
            height,
        });
    }

    let block = imageops::crop_imm(
        source.pixels(),
        region.x,
        region.y,
        region.width,
        region.height,
    )
    .to_image();

    if block.dimensions() == (TILE_SIZE, TILE_SIZE) {
        return Ok(block);
    }
    Ok(imageops::resize(&block, TILE_SIZE, TILE_SIZE, filter.into()))
}
