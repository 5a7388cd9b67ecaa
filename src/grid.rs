//! Tile grid geometry for one zoom level.
//!
//! At zoom level `z` the source is split into a square grid of `2^z × 2^z`
//! cells. Every cell covers a square region of `dimension / 2^z` source pixels
//! (truncating division), so when the dimension is not a multiple of `2^z`
//! the strip along the right and bottom edges is not covered by any tile.
//!
//! ## Axis pairing
//!
//! Tiles are addressed as `{zoom}/{column}/{row}`, but the **row** index
//! selects the horizontal offset and the **column** index the vertical one:
//!
//! ```text
//! x = row    * region_size
//! y = column * region_size
//! ```
//!
//! Viewers consuming this layout depend on that pairing; do not swap it.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Deepest zoom level whose grid side (`2^zoom`) still fits in a `u32`.
pub const MAX_ZOOM: u32 = u32::BITS - 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error(
        "Zoom level {zoom} is too deep for a {dimension}px source: tiles would be smaller than one pixel"
    )]
    InvalidGeometry { zoom: u32, dimension: u32 },
}

/// Number of rows (and columns) at `zoom`: `2^zoom`.
///
/// Returns `None` past [`MAX_ZOOM`].
pub fn rows_and_cols(zoom: u32) -> Option<u32> {
    1u32.checked_shl(zoom)
}

/// Same value as [`rows_and_cols`], derived from the cell count instead:
/// `isqrt(4^zoom)`.
pub fn rows_and_cols_from_cell_count(zoom: u32) -> Option<u32> {
    let cells = 4u64.checked_pow(zoom)?;
    u32::try_from(cells.isqrt()).ok()
}

/// Address of one tile in the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub zoom: u32,
    pub column: u32,
    pub row: u32,
}

impl TileCoord {
    /// Path of this tile relative to the output root: `{zoom}/{column}/{row}.{ext}`.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        PathBuf::from(self.zoom.to_string())
            .join(self.column.to_string())
            .join(format!("{}.{}", self.row, extension))
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.column, self.row)
    }
}

/// Rectangle of source pixels that one tile is resampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SourceRegion {
    /// Exclusive right edge. Widened so it cannot overflow.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= u64::from(width) && self.bottom() <= u64::from(height)
    }

    pub fn overlaps(&self, other: &SourceRegion) -> bool {
        u64::from(self.x) < other.right()
            && u64::from(other.x) < self.right()
            && u64::from(self.y) < other.bottom()
            && u64::from(other.y) < self.bottom()
    }
}

impl fmt::Display for SourceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.x, self.y
        )
    }
}

/// Grid parameters for a single zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub zoom: u32,
    pub rows_and_cols: u32,
    pub region_size: u32,
}

impl TileGrid {
    /// Plan the grid for `zoom` over a square source of side `dimension`.
    ///
    /// Fails when a cell would be smaller than one source pixel.
    pub fn plan(zoom: u32, dimension: u32) -> Result<Self, GridError> {
        let invalid = GridError::InvalidGeometry { zoom, dimension };
        let rows_and_cols = rows_and_cols(zoom).ok_or_else(|| invalid.clone())?;
        debug_assert_eq!(Some(rows_and_cols), rows_and_cols_from_cell_count(zoom));

        let region_size = dimension / rows_and_cols;
        if region_size == 0 {
            return Err(invalid);
        }

        Ok(Self {
            zoom,
            rows_and_cols,
            region_size,
        })
    }

    /// Total number of tiles at this level.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.rows_and_cols) * u64::from(self.rows_and_cols)
    }

    /// Source region for the cell at `(column, row)`. Row drives x, column drives y.
    pub fn region(&self, column: u32, row: u32) -> SourceRegion {
        SourceRegion {
            x: row * self.region_size,
            y: column * self.region_size,
            width: self.region_size,
            height: self.region_size,
        }
    }

    /// Every cell of the grid, column ascending then row ascending.
    pub fn cells(&self) -> impl Iterator<Item = (TileCoord, SourceRegion)> + '_ {
        (0..self.rows_and_cols).flat_map(move |column| {
            (0..self.rows_and_cols).map(move |row| {
                let coord = TileCoord {
                    zoom: self.zoom,
                    column,
                    row,
                };
                (coord, self.region(column, row))
            })
        })
    }
}
