//! Tile persistence.
//!
//! The [`TileWriter`] trait is the seam between the pyramid driver and the
//! filesystem. The production implementation is [`FsTileWriter`], which
//! encodes each tile as PNG or JPEG under `{root}/{zoom}/{column}/{row}.{ext}`.
//! Tests substitute a recording writer so the driver can be exercised
//! without encoding anything.

use super::error::ImagingError;
use super::params::Quality;
use super::resample::OutputTile;
use crate::grid::TileCoord;
use crate::validate::TileFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for finished tiles.
///
/// Must be `Sync`: tiles of one zoom level are written from the rayon pool.
pub trait TileWriter: Sync {
    /// Persist `tile` at `coord`, returning where it was written.
    fn write(&self, coord: TileCoord, tile: &OutputTile) -> Result<PathBuf, ImagingError>;
}

/// Writes tiles to `{root}/{zoom}/{column}/{row}.{ext}`.
#[derive(Debug, Clone)]
pub struct FsTileWriter {
    root: PathBuf,
    format: TileFormat,
    quality: Quality,
}

impl FsTileWriter {
    pub fn new(root: impl Into<PathBuf>, format: TileFormat, quality: Quality) -> Self {
        Self {
            root: root.into(),
            format,
            quality,
        }
    }

    pub fn format(&self) -> TileFormat {
        self.format
    }

    /// Where the tile at `coord` lands.
    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.root.join(coord.relative_path(self.format.extension()))
    }
}

impl TileWriter for FsTileWriter {
    fn write(&self, coord: TileCoord, tile: &OutputTile) -> Result<PathBuf, ImagingError> {
        let path = self.tile_path(coord);
        if let Some(column_dir) = path.parent() {
            // create_dir_all tolerates another worker creating the same directory
            std::fs::create_dir_all(column_dir).map_err(|e| write_error(&path, e))?;
        }
        encode_tile(tile, self.format, self.quality, &path)?;
        Ok(path)
    }
}

fn write_error(path: &Path, reason: impl ToString) -> ImagingError {
    ImagingError::Write {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Encode and flush a tile, replacing any existing file at `path`.
fn encode_tile(
    tile: &OutputTile,
    format: TileFormat,
    quality: Quality,
    path: &Path,
) -> Result<(), ImagingError> {
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut writer = BufWriter::new(file);
    let (width, height) = tile.dimensions();

    let encoded = match format {
        TileFormat::Png => PngEncoder::new(&mut writer).write_image(
            tile.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        TileFormat::Jpg => JpegEncoder::new_with_quality(&mut writer, quality.value())
            .write_image(tile.as_raw(), width, height, ExtendedColorType::Rgb8),
    };
    encoded.map_err(|e| write_error(path, e))?;
    writer.flush().map_err(|e| write_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::TILE_SIZE;
    use crate::test_helpers::quadrant_image;
    use image::{ImageFormat, ImageReader};

    fn coord(zoom: u32, column: u32, row: u32) -> TileCoord {
        TileCoord { zoom, column, row }
    }

    #[test]
    fn tile_path_layout() {
        let writer = FsTileWriter::new("/out", TileFormat::Jpg, Quality::default());
        assert_eq!(
            writer.tile_path(coord(2, 3, 1)),
            PathBuf::from("/out/2/3/1.jpg")
        );
    }

    #[test]
    fn writes_png_and_creates_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let writer = FsTileWriter::new(tmp.path(), TileFormat::Png, Quality::default());
        let tile = quadrant_image(TILE_SIZE);

        let path = writer.write(coord(1, 0, 1), &tile).unwrap();
        assert_eq!(path, tmp.path().join("1/0/1.png"));

        let reader = ImageReader::open(&path).unwrap().with_guessed_format().unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Png));
        let decoded = reader.decode().unwrap().into_rgb8();
        assert_eq!(decoded, tile);
    }

    #[test]
    fn writes_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let writer = FsTileWriter::new(tmp.path(), TileFormat::Jpg, Quality::new(90));
        let tile = quadrant_image(TILE_SIZE);

        let path = writer.write(coord(0, 0, 0), &tile).unwrap();
        let reader = ImageReader::open(&path).unwrap().with_guessed_format().unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Jpeg));
        let decoded = reader.decode().unwrap();
        assert_eq!((decoded.width(), decoded.height()), (TILE_SIZE, TILE_SIZE));
    }

    #[test]
    fn jpeg_quality_affects_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let tile = OutputTile::from_fn(TILE_SIZE, TILE_SIZE, |x, y| {
            image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x ^ y) % 256) as u8])
        });

        let low = FsTileWriter::new(tmp.path().join("low"), TileFormat::Jpg, Quality::new(10));
        let high = FsTileWriter::new(tmp.path().join("high"), TileFormat::Jpg, Quality::new(100));
        let low_len = std::fs::metadata(low.write(coord(0, 0, 0), &tile).unwrap())
            .unwrap()
            .len();
        let high_len = std::fs::metadata(high.write(coord(0, 0, 0), &tile).unwrap())
            .unwrap()
            .len();
        assert!(low_len < high_len, "{low_len} >= {high_len}");
    }

    #[test]
    fn overwrites_existing_tile() {
        let tmp = tempfile::TempDir::new().unwrap();
        let writer = FsTileWriter::new(tmp.path(), TileFormat::Png, Quality::default());
        let first = OutputTile::from_pixel(TILE_SIZE, TILE_SIZE, image::Rgb([255, 0, 0]));
        let second = OutputTile::from_pixel(TILE_SIZE, TILE_SIZE, image::Rgb([0, 0, 255]));

        writer.write(coord(0, 0, 0), &first).unwrap();
        let path = writer.write(coord(0, 0, 0), &second).unwrap();

        let decoded = image::open(&path).unwrap().into_rgb8();
        assert_eq!(decoded, second);
    }

    #[test]
    fn same_tile_encodes_to_same_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let tile = quadrant_image(TILE_SIZE);
        for format in TileFormat::ALL {
            let a = FsTileWriter::new(tmp.path().join("a"), format, Quality::default());
            let b = FsTileWriter::new(tmp.path().join("b"), format, Quality::default());
            let a_bytes = std::fs::read(a.write(coord(0, 0, 0), &tile).unwrap()).unwrap();
            let b_bytes = std::fs::read(b.write(coord(0, 0, 0), &tile).unwrap()).unwrap();
            assert_eq!(a_bytes, b_bytes, "{format}");
        }
    }

    #[test]
    fn unwritable_root_is_write_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        // A regular file where the zoom directory should go
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let writer = FsTileWriter::new(&blocker, TileFormat::Png, Quality::default());

        let err = writer
            .write(coord(0, 0, 0), &quadrant_image(TILE_SIZE))
            .unwrap_err();
        assert!(matches!(err, ImagingError::Write { .. }));
        assert!(err.to_string().contains("0.png"));
    }
}
