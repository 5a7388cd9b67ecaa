//! Shared test utilities for the tiler test suite.
//!
//! Provides synthetic source images, a recording [`TileWriter`], and an
//! output tree lister.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = SourceImage::from_rgb(quadrant_image(64));
//! let writer = RecordingWriter::new();
//! generate_pyramid(&source, 2, &writer, ResampleFilter::Nearest, None).unwrap();
//! assert_eq!(writer.coords().len(), 21);
//! ```

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{Rgb, RgbImage};

use crate::grid::TileCoord;
use crate::imaging::{ImagingError, OutputTile, TileWriter};

// =========================================================================
// Synthetic images
// =========================================================================

/// Quadrant colors in order: top-left, top-right, bottom-left, bottom-right.
pub const QUADRANT_COLORS: [Rgb<u8>; 4] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 0]),
];

/// A `size × size` image split into four solid quadrants.
///
/// For odd sizes the extra row/column belongs to the right/bottom quadrants.
pub fn quadrant_image(size: u32) -> RgbImage {
    let half = size / 2;
    RgbImage::from_fn(size, size, |x, y| {
        let index = usize::from(x >= half) + 2 * usize::from(y >= half);
        QUADRANT_COLORS[index]
    })
}

/// Save an image as PNG, regardless of the path's extension.
pub fn write_png(path: &Path, image: &RgbImage) {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

// =========================================================================
// Output tree
// =========================================================================

/// Every file under `root`, as sorted `/`-separated relative paths.
///
/// Returns an empty list when `root` does not exist.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if root.exists() {
        collect_files(root, root, &mut files).unwrap();
    }
    files.sort();
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<String>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else {
            let relative = path.strip_prefix(root).unwrap();
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            files.push(parts.join("/"));
        }
    }
    Ok(())
}

// =========================================================================
// Recording writer
// =========================================================================

/// Writer that records tiles without encoding them.
/// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
#[derive(Default)]
pub struct RecordingWriter {
    written: Mutex<Vec<(TileCoord, (u32, u32))>>,
    fail_at: Option<TileCoord>,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that returns a write error for `coord` and records everything else.
    pub fn failing_at(coord: TileCoord) -> Self {
        Self {
            fail_at: Some(coord),
            ..Self::default()
        }
    }

    /// Coordinates in the order they were written.
    pub fn coords(&self) -> Vec<TileCoord> {
        self.written.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    /// Tile dimensions in the order they were written.
    pub fn sizes(&self) -> Vec<(u32, u32)> {
        self.written.lock().unwrap().iter().map(|(_, s)| *s).collect()
    }
}

impl TileWriter for RecordingWriter {
    fn write(&self, coord: TileCoord, tile: &OutputTile) -> Result<PathBuf, ImagingError> {
        let path = coord.relative_path("png");
        if self.fail_at == Some(coord) {
            return Err(ImagingError::Write {
                path,
                reason: "simulated failure".into(),
            });
        }
        self.written
            .lock()
            .unwrap()
            .push((coord, tile.dimensions()));
        Ok(path)
    }
}
