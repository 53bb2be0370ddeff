//! Command-line and config-file settings.
//!
//! Settings are resolved in order of priority:
//! 1. Command-line flags
//! 2. `HMAPGEN_KEY` environment variable (API key only)
//! 3. YAML config file given with `--config`
//! 4. Built-in defaults

use crate::{HmapgenError, Result};
use clap::{Parser, ValueEnum};
use hmapgen_core::Bound;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the API key.
pub const KEY_ENV_VAR: &str = "HMAPGEN_KEY";

/// Default distance between grid points, in meters.
pub const DEFAULT_PRECISION_M: f64 = 100.0;

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "./output.png";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Elevation service to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Bing Maps Elevations API (100 points per request).
    Bing,
    /// IGN Géoportail altimetry (50 points per request).
    #[default]
    Ign,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Bing => write!(f, "bing"),
            ProviderKind::Ign => write!(f, "ign"),
        }
    }
}

/// Generate a 16-bit grayscale heightmap of an area.
#[derive(Debug, Parser)]
#[command(name = "hmapgen", version, about)]
pub struct Cli {
    /// Area to sample, in decimal degrees: SOUTH WEST NORTH EAST
    #[arg(
        required = true,
        num_args = 4,
        value_names = ["SOUTH", "WEST", "NORTH", "EAST"],
        allow_negative_numbers = true
    )]
    pub area: Vec<f64>,

    /// Elevation service
    #[arg(short, long, value_enum)]
    pub service: Option<ProviderKind>,

    /// API key for the elevation service (falls back to HMAPGEN_KEY)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Distance between grid points, in meters [default: 100]
    #[arg(short, long)]
    pub precision: Option<f64>,

    /// Output PNG file [default: ./output.png]
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Timeout for each elevation request, in seconds [default: 60]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Override the elevation service URL (scheme and host)
    #[arg(long, hide = true)]
    pub base_url: Option<String>,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Contents of a `--config` YAML file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub service: Option<ProviderKind>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load a config file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Parse a config file from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Fully resolved generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Elevation service.
    pub service: ProviderKind,
    /// API key for the service.
    pub key: String,
    /// Distance between grid points, in meters.
    pub precision: f64,
    /// Output PNG file.
    pub file: PathBuf,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Service URL override.
    pub base_url: Option<String>,
}

impl Options {
    /// Merge command-line values over config-file values and defaults.
    pub fn resolve(cli: &Cli, file: FileConfig, env_key: Option<String>) -> Result<Self> {
        let key = cli
            .key
            .clone()
            .or(env_key)
            .or(file.key)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                HmapgenError::Config(format!(
                    "no API key given (use --key, {} or the config file)",
                    KEY_ENV_VAR
                ))
            })?;

        let precision = cli
            .precision
            .or(file.precision)
            .unwrap_or(DEFAULT_PRECISION_M);
        if !precision.is_finite() || precision <= 0.0 {
            return Err(HmapgenError::Config(format!(
                "precision must be a positive number of meters, got {}",
                precision
            )));
        }

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(HmapgenError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(Self {
            service: cli.service.or(file.service).unwrap_or_default(),
            key,
            precision,
            file: cli
                .file
                .clone()
                .or(file.file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            timeout: Duration::from_secs(timeout_secs),
            base_url: cli.base_url.clone().or(file.base_url),
        })
    }
}

impl Cli {
    /// Bounding box from the `SOUTH WEST NORTH EAST` arguments.
    pub fn bound(&self) -> Result<Bound> {
        match self.area.as_slice() {
            &[south, west, north, east] => Ok(Bound::new(west, south, east, north)),
            other => Err(HmapgenError::Config(format!(
                "expected 4 area values (SOUTH WEST NORTH EAST), got {}",
                other.len()
            ))),
        }
    }

    /// Resolve the generation settings, reading `--config` and `HMAPGEN_KEY`.
    pub fn options(&self) -> Result<Options> {
        let file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        let env_key = std::env::var(KEY_ENV_VAR).ok();
        Options::resolve(self, file, env_key)
    }
}
