//! Pyramid generation: the zoom → column → row loop.
//!
//! For every zoom level from 0 up to the requested maximum, the grid is
//! planned from the source dimension, then every cell is cut, resampled to
//! 256×256 and handed to a [`TileWriter`].
//!
//! ## Output Structure
//!
//! ```text
//! ./
//! ├── 0/
//! │   └── 0/
//! │       └── 0.png          # whole image
//! ├── 1/
//! │   ├── 0/
//! │   │   ├── 0.png          # x = 0,   y = 0
//! │   │   └── 1.png          # x = 256, y = 0
//! │   └── 1/
//! │       ├── 0.png          # x = 0,   y = 256
//! │       └── 1.png
//! └── ...
//! ```
//!
//! ## Parallel Processing
//!
//! Levels run in ascending order. Tiles within a level are independent and
//! are processed in parallel using [rayon](https://docs.rs/rayon). The
//! source image is shared read-only and no two tiles share a path. The first
//! failing tile aborts the run; tiles already written are left in place.

use crate::grid::{GridError, TileCoord, TileGrid};
use crate::imaging::{
    FsTileWriter, ImagingError, Quality, ResampleFilter, SourceImage, TileWriter, extract_tile,
};
use crate::validate::{self, InputError};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PyramidError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Imaging(#[from] ImagingError),
}

/// Progress reported while the pyramid is generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileEvent {
    LevelStarted {
        zoom: u32,
        rows_and_cols: u32,
        region_size: u32,
    },
    TileWritten {
        coord: TileCoord,
        path: PathBuf,
    },
}

/// What was produced for one zoom level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub zoom: u32,
    pub rows_and_cols: u32,
    pub region_size: u32,
    pub tiles: u64,
}

/// What a whole run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PyramidSummary {
    pub levels: Vec<LevelSummary>,
}

impl PyramidSummary {
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(|l| l.tiles).sum()
    }
}

/// Settings for a full run from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory the `{zoom}/{column}/{row}` tree is written under.
    pub output_root: PathBuf,
    pub filter: ResampleFilter,
    pub quality: Quality,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            filter: ResampleFilter::default(),
            quality: Quality::default(),
        }
    }
}

/// Validate the raw arguments, decode the source, and write the pyramid.
///
/// `input` and `max_zoom` are taken exactly as typed so that validation
/// errors can echo them back.
pub fn run(
    input: &str,
    max_zoom: &str,
    options: &RunOptions,
    progress: Option<Sender<TileEvent>>,
) -> Result<PyramidSummary, PyramidError> {
    let format = validate::tile_format(input)?;
    let max_zoom = validate::parse_zoom(max_zoom)?;
    let source = SourceImage::open(Path::new(input))?;
    let writer = FsTileWriter::new(&options.output_root, format, options.quality);
    generate_pyramid(&source, max_zoom, &writer, options.filter, progress)
}

/// Write every tile of levels `0..=max_zoom` through `writer`.
pub fn generate_pyramid(
    source: &SourceImage,
    max_zoom: u32,
    writer: &impl TileWriter,
    filter: ResampleFilter,
    progress: Option<Sender<TileEvent>>,
) -> Result<PyramidSummary, PyramidError> {
    let mut summary = PyramidSummary::default();

    for zoom in 0..=max_zoom {
        let grid = TileGrid::plan(zoom, source.dimension())?;
        send(
            progress.as_ref(),
            TileEvent::LevelStarted {
                zoom,
                rows_and_cols: grid.rows_and_cols,
                region_size: grid.region_size,
            },
        );

        let cells: Vec<_> = grid.cells().collect();
        cells
            .into_par_iter()
            .try_for_each(|(coord, region)| -> Result<(), ImagingError> {
                let tile = extract_tile(source, region, filter)?;
                let path = writer.write(coord, &tile)?;
                send(progress.as_ref(), TileEvent::TileWritten { coord, path });
                Ok(())
            })?;

        summary.levels.push(LevelSummary {
            zoom,
            rows_and_cols: grid.rows_and_cols,
            region_size: grid.region_size,
            tiles: grid.tile_count(),
        });
    }

    Ok(summary)
}

/// The receiver may already be gone (e.g. quiet mode); progress is best-effort.
fn send(progress: Option<&Sender<TileEvent>>, event: TileEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event);
    }
}
