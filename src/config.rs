//! Tiler configuration.
//!
//! Every setting has a default, so no config file is needed. A TOML file can
//! be passed with `--config`, and individual command-line flags override
//! whatever the file says:
//!
//! ```text
//! stock defaults  →  --config file  →  --quality / --filter / --jobs
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 75              # JPEG tile quality (1-100), ignored for PNG
//! filter = "nearest"        # nearest | bilinear | catmull-rom | lanczos3
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Quality, ResampleFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tiler configuration, loaded from an optional TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TilerConfig {
    /// Tile encoding and resampling settings.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl TilerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values, then re-validate.
    pub fn with_overrides(
        mut self,
        quality: Option<u32>,
        filter: Option<ResampleFilter>,
        jobs: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(quality) = quality {
            self.output.quality = quality;
        }
        if let Some(filter) = filter {
            self.output.filter = filter;
        }
        if let Some(jobs) = jobs {
            self.processing.max_processes = Some(jobs);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }
}

/// Tile encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Interpolation used to scale regions to the tile size.
    pub filter: ResampleFilter,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: u32::from(Quality::default().value()),
            filter: ResampleFilter::default(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel tile workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load and validate a config file.
///
/// Keys missing from the file keep their stock defaults.
pub fn load_config(path: &Path) -> Result<TilerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: TilerConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock config file.
///
/// Printed by `tiler --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Tiler Configuration
# ===================
#
# Pass this file with `tiler --config tiler.toml <image> <zoom>`.
# All options are optional; the values below are the defaults.
# Command-line flags override values from this file.

[output]
# JPEG tile quality (1 = smallest file, 100 = best quality).
# PNG tiles are lossless and ignore this setting.
quality = 75

# Interpolation used to scale each source region to 256x256.
# nearest     - fastest, hard pixel edges when zooming past the source resolution
# bilinear    - smooth, slightly soft
# catmull-rom - sharper than bilinear
# lanczos3    - highest quality, slowest
filter = "nearest"

[processing]
# Maximum number of tiles encoded in parallel.
# Omit to use all CPU cores. Larger values are clamped to the core count.
# Set to 1 to write tiles strictly in column/row order.
# max_processes = 4
"##
}
