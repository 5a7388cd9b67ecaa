//! Parameter types for tile encoding and resampling.
//!
//! - [`TILE_SIZE`]: the fixed width and height of every output tile.
//! - [`Quality`]: JPEG encoding quality (1–100, default 75). Clamped on construction.
//! - [`ResampleFilter`]: the interpolation used to scale a source region to [`TILE_SIZE`].

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Edge length, in pixels, of every tile written to disk.
pub const TILE_SIZE: u32 = 256;

/// Quality setting for JPEG tile encoding (1-100). Ignored for PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Interpolation used when scaling a region up or down to the tile size.
///
/// `Nearest` is the default: it is the cheapest, it keeps hard pixel edges
/// when deep zoom levels upscale a handful of source pixels, and its output
/// is easy to predict in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    #[default]
    Nearest,
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl ResampleFilter {
    pub const ALL: [ResampleFilter; 4] = [
        ResampleFilter::Nearest,
        ResampleFilter::Bilinear,
        ResampleFilter::CatmullRom,
        ResampleFilter::Lanczos3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResampleFilter::Nearest => "nearest",
            ResampleFilter::Bilinear => "bilinear",
            ResampleFilter::CatmullRom => "catmull-rom",
            ResampleFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Bilinear => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResampleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!("unknown filter '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
