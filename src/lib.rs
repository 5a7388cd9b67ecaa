//! # Tiler
//!
//! Slices a single PNG or JPEG image into a pyramid of 256×256 tiles, the
//! layout map viewers and deep-zoom clients request tiles in.
//!
//! ```text
//! tiler map.png 2
//!
//! 0/0/0.png                 1 tile,  whole image
//! 1/{0,1}/{0,1}.png         4 tiles, one per quadrant
//! 2/{0..3}/{0..3}.png      16 tiles
//! ```
//!
//! # Architecture: Single-Pass Pipeline
//!
//! ```text
//! validate  →  decode  →  for each zoom:  plan grid  →  for each cell:  resample  →  write
//! ```
//!
//! Nothing is cached between runs. Running twice over the same input
//! overwrites every tile with identical bytes.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Extension → [`validate::TileFormat`], zoom string → `u32` |
//! | [`grid`] | Per-level grid size, region size, and cell regions |
//! | [`imaging`] | Decode, resample to tile size, encode and write |
//! | [`pyramid`] | The zoom/column/row loop, progress events, run summary |
//! | [`config`] | Optional TOML config with CLI overrides |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Truncating Region Size
//!
//! A level's region size is `dimension / 2^zoom`, rounded down. When the source
//! does not divide evenly, the leftover strip on the right and bottom edges is
//! not part of any tile. Padding or rounding would change tile geometry, so the
//! strip is dropped.
//!
//! ## Row Selects X
//!
//! Tiles live at `{zoom}/{column}/{row}`, and the row index picks the
//! horizontal offset while the column index picks the vertical one. See
//! [`grid`] for details.
//!
//! ## Opaque Output
//!
//! Tiles are always 24-bit RGB. Transparent source pixels are composited over
//! black when the source is decoded.

pub mod config;
pub mod grid;
pub mod imaging;
pub mod output;
pub mod pyramid;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
