//! IGN (Géoportail) altimetry REST client.
//!
//! Endpoint: `https://wxs.ign.fr/{key}/alti/rest/elevation.json`
//!
//! Longitudes and latitudes are sent as two parallel comma-separated lists.
//! Points the service has no data for come back with a large negative `z`
//! (-99999); those and any other non-positive heights are reported as 0.

use crate::http::{endpoint, get_json, ClientOptions};
use crate::{ProviderError, Result};
use hmapgen_core::{ElevationSource, Point, SourceError};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Public Géoportail endpoint.
pub const IGN_BASE_URL: &str = "https://wxs.ign.fr";

/// Maximum number of points per IGN request.
pub const IGN_MAX_POINTS: usize = 50;

#[derive(Debug, Deserialize)]
struct IgnResponse {
    #[serde(default)]
    elevations: Vec<IgnElevationPoint>,
    #[serde(default)]
    http: Option<IgnHttpStatus>,
}

#[derive(Debug, Deserialize)]
struct IgnElevationPoint {
    z: f64,
}

#[derive(Debug, Deserialize)]
struct IgnHttpStatus {
    #[serde(default)]
    error: String,
}

impl IgnResponse {
    fn into_elevations(self) -> Result<Vec<f64>> {
        if let Some(http) = self.http {
            if !http.error.is_empty() {
                return Err(ProviderError::Api(http.error));
            }
        }
        Ok(self
            .elevations
            .into_iter()
            .map(|e| known_height(e.z))
            .collect())
    }
}

/// Replace the "unknown" marker (and any non-positive height) with 0.
fn known_height(z: f64) -> f64 {
    if z <= 0.0 {
        0.0
    } else {
        z
    }
}

/// Elevation source backed by the IGN altimetry service.
pub struct IgnElevation {
    key: String,
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for IgnElevation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgnElevation")
            .field("base_url", &self.base_url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl IgnElevation {
    /// Create a client for the public endpoint.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_options(key, ClientOptions::default())
    }

    /// Create a client with custom connection settings.
    pub fn with_options(key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ProviderError::EmptyKey);
        }
        Ok(Self {
            key,
            base_url: options.base_url_parsed(IGN_BASE_URL)?,
            client: options.build_client()?,
        })
    }

    /// Request URL for `points`.
    ///
    /// The key is a path segment and is percent-encoded.
    pub fn request_url(&self, points: &[Point]) -> Url {
        let lons = points
            .iter()
            .map(Point::lng_wire)
            .collect::<Vec<_>>()
            .join(",");
        let lats = points
            .iter()
            .map(Point::lat_wire)
            .collect::<Vec<_>>()
            .join(",");
        let mut url = endpoint(
            &self.base_url,
            &[self.key.as_str(), "alti", "rest", "elevation.json"],
        );
        url.set_query(Some(&format!(
            "lon={}&lat={}&delimiter=,&output=json&zonly=false",
            lons, lats
        )));
        url
    }

    /// Fetch elevations for `points`, with unknown heights reported as 0.
    pub fn fetch(&self, points: &[Point]) -> Result<Vec<f64>> {
        debug!(points = points.len(), "requesting IGN elevations");
        let response: IgnResponse = get_json(&self.client, self.request_url(points))?;
        response.into_elevations()
    }
}

impl ElevationSource for IgnElevation {
    fn name(&self) -> &str {
        "ign"
    }

    fn max_points_per_request(&self) -> usize {
        IGN_MAX_POINTS
    }

    fn elevations(&self, points: &[Point]) -> std::result::Result<Vec<f64>, SourceError> {
        Ok(self.fetch(points)?)
    }
}
