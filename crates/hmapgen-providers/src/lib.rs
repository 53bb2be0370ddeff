//! # hmapgen-providers
//!
//! HTTP clients for the elevation services supported by hmapgen. Each one
//! implements [`hmapgen_core::ElevationSource`].
//!
//! | Service | Type | Points per request | Unknown heights |
//! |---------|------|--------------------|-----------------|
//! | Bing Maps Elevations | [`BingElevation`] | 100 | as reported |
//! | IGN Géoportail altimetry | [`IgnElevation`] | 50 | replaced by 0 |
//!
//! Requests are blocking and issued one at a time by the caller.
//!
//! ## Example
//!
//! ```no_run
//! use hmapgen_core::{ElevationSource, Point};
//! use hmapgen_providers::IgnElevation;
//!
//! let ign = IgnElevation::new("my-api-key")?;
//! let heights = ign.fetch(&[Point::new(45.832622, 6.865175)])?;
//! println!("Mont Blanc: {} meters", heights[0]);
//! assert_eq!(ign.max_points_per_request(), 50);
//! # Ok::<(), hmapgen_providers::ProviderError>(())
//! ```

mod bing;
mod error;
mod http;
mod ign;

pub use bing::{BingElevation, BING_BASE_URL, BING_MAX_POINTS};
pub use error::ProviderError;
pub use http::{ClientOptions, DEFAULT_TIMEOUT};
pub use ign::{IgnElevation, IGN_BASE_URL, IGN_MAX_POINTS};

/// Result type for elevation API operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
