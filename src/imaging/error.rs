//! Errors raised while decoding, resampling, or writing tiles.

use crate::grid::SourceRegion;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("Failed to read image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Region {region} lies outside the {width}x{height} source image")]
    OutOfBounds {
        region: SourceRegion,
        width: u32,
        height: u32,
    },
    #[error("Failed to write tile {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}
