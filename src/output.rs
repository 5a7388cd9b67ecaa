//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Zoom 0: 1x1 tiles, region 512px
//!     0/0/0 → ./0/0/0.png
//! Zoom 1: 2x2 tiles, region 256px
//!     1/0/0 → ./1/0/0.png
//!     ...
//!
//! Wrote 5 tiles across 2 zoom levels
//! ```
//!
//! Per-tile lines are only shown in verbose mode. With more than one worker
//! they appear in completion order, not grid order.
//!
//! # Architecture
//!
//! Each piece of output has a `format_*` function (returns `Vec<String>`) for
//! testability and, where useful, a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.

use crate::pyramid::{PyramidSummary, TileEvent};

/// Format a single progress event as display lines.
///
/// `TileWritten` events produce no lines unless `verbose` is set.
pub fn format_tile_event(event: &TileEvent, verbose: bool) -> Vec<String> {
    match event {
        TileEvent::LevelStarted {
            zoom,
            rows_and_cols,
            region_size,
        } => vec![format!(
            "Zoom {zoom}: {rows_and_cols}x{rows_and_cols} tiles, region {region_size}px"
        )],
        TileEvent::TileWritten { coord, path } if verbose => {
            vec![format!("    {} \u{2192} {}", coord, path.display())]
        }
        TileEvent::TileWritten { .. } => Vec::new(),
    }
}

/// Format the end-of-run summary line.
pub fn format_summary(summary: &PyramidSummary) -> Vec<String> {
    let tiles = summary.total_tiles();
    let levels = summary.levels.len();
    vec![format!(
        "Wrote {} {} across {} zoom {}",
        tiles,
        plural(tiles as usize, "tile", "tiles"),
        levels,
        plural(levels, "level", "levels"),
    )]
}

pub fn print_summary(summary: &PyramidSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
