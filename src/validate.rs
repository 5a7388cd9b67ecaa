//! Command-line input validation.
//!
//! Both checks are pure: they look at the strings exactly as the user typed
//! them and never touch the filesystem.
//!
//! - [`tile_format`]: the text after the last `.` of the input path must be
//!   one of the supported extensions (`png`, `jpg`). Matching is
//!   case-sensitive, so `photo.PNG` is rejected.
//! - [`parse_zoom`]: the zoom argument must be a plain run of ASCII digits.
//!   Signs, whitespace and decimal points are rejected.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Extension could not be obtained for: {0}")]
    MissingExtension(String),
    #[error("Extension '{0}' is not supported (expected png or jpg)")]
    UnsupportedFormat(String),
    #[error("The given zoom level '{0}' is not a non-negative integer")]
    InvalidZoom(String),
}

/// Output encoding for tiles, chosen from the input file's extension.
///
/// Tiles are always written in the same format as the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFormat {
    Png,
    Jpg,
}

impl TileFormat {
    pub const ALL: [TileFormat; 2] = [TileFormat::Png, TileFormat::Jpg];

    /// File extension used for tile paths, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Jpg => "jpg",
        }
    }

    fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == extension)
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Determine the tile format from the input path's extension.
///
/// The extension is everything after the last `.` in the whole path string,
/// so `dir.v2/image` yields `v2/image` and is rejected.
pub fn tile_format(path: &str) -> Result<TileFormat, InputError> {
    let (_, extension) = path
        .rsplit_once('.')
        .ok_or_else(|| InputError::MissingExtension(path.to_string()))?;
    TileFormat::from_extension(extension)
        .ok_or_else(|| InputError::UnsupportedFormat(extension.to_string()))
}

/// Parse the maximum zoom level argument.
///
/// Digit strings that overflow `u32` are rejected as well; nothing that large
/// could produce a valid grid anyway.
pub fn parse_zoom(text: &str) -> Result<u32, InputError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::InvalidZoom(text.to_string()));
    }
    text.parse()
        .map_err(|_| InputError::InvalidZoom(text.to_string()))
}
