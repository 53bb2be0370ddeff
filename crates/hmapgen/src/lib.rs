//! # hmapgen
//!
//! Generates 16-bit grayscale heightmaps of an area from online elevation
//! services.
//!
//! This crate wires together the sampling pipeline from `hmapgen-core`, the
//! HTTP clients from `hmapgen-providers`, PNG output and the command line.
//!
//! ## Example
//!
//! ```no_run
//! use hmapgen::{build_source, generate_heightmap, ConsoleProgress, Options, ProviderKind};
//! use hmapgen_core::Bound;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! let options = Options {
//!     service: ProviderKind::Ign,
//!     key: "my-api-key".to_string(),
//!     precision: 50.0,
//!     file: PathBuf::from("chartreuse.png"),
//!     timeout: Duration::from_secs(60),
//!     base_url: None,
//! };
//! let bound = Bound::new(5.70, 45.30, 5.90, 45.40);
//! let source = build_source(&options)?;
//! let response = generate_heightmap(bound, &options, &source, &mut ConsoleProgress::stderr())?;
//! println!("{} ({} m of relief)", response.filename.display(), response.height_offset);
//! # Ok::<(), hmapgen::HmapgenError>(())
//! ```

mod config;
mod error;
mod output;
mod progress;

pub use config::{
    Cli, FileConfig, Options, ProviderKind, DEFAULT_OUTPUT, DEFAULT_PRECISION_M,
    DEFAULT_TIMEOUT_SECS, KEY_ENV_VAR,
};
pub use error::{report_lines, HmapgenError};
pub use output::write_png;
pub use progress::{render_line, ConsoleProgress};

use hmapgen_core::{generate, Bound, ElevationSource, ProgressObserver};
use hmapgen_providers::{BingElevation, ClientOptions, IgnElevation};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Result type for heightmap generation.
pub type Result<T> = std::result::Result<T, HmapgenError>;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Path of the written heightmap.
    pub filename: PathBuf,
    /// Height difference between the lowest and the highest point, in meters.
    pub height_offset: i64,
}

/// Create the elevation client selected by `options`.
pub fn build_source(options: &Options) -> Result<Box<dyn ElevationSource>> {
    let mut client = ClientOptions::default().with_timeout(options.timeout);
    if let Some(base_url) = &options.base_url {
        client = client.with_base_url(base_url.as_str());
    }

    let source: Box<dyn ElevationSource> = match options.service {
        ProviderKind::Bing => Box::new(BingElevation::with_options(options.key.as_str(), client)?),
        ProviderKind::Ign => Box::new(IgnElevation::with_options(options.key.as_str(), client)?),
    };
    Ok(source)
}

/// Sample `bound`, rasterize it and write the PNG named in `options`.
///
/// The file is only written once every elevation request has succeeded.
pub fn generate_heightmap<S, O>(
    bound: Bound,
    options: &Options,
    source: &S,
    observer: &mut O,
) -> Result<Response>
where
    S: ElevationSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    let heightmap = generate(bound, options.precision, source, observer)?;
    write_png(&options.file, &heightmap.pixels)?;
    info!(
        "Wrote {}x{} heightmap to {}",
        heightmap.pixels.width(),
        heightmap.pixels.height(),
        options.file.display()
    );

    Ok(Response {
        filename: options.file.clone(),
        height_offset: heightmap.height_offset(),
    })
}
