//! Bing Maps Elevations API client.
//!
//! Endpoint: `http://dev.virtualearth.net/REST/v1/Elevation/List`
//!
//! Points are sent as a flat `lat,lng,lat,lng,...` list and heights are
//! returned relative to sea level, in the same order.

use crate::http::{endpoint, get_json, ClientOptions};
use crate::{ProviderError, Result};
use hmapgen_core::{ElevationSource, Point, SourceError};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

/// Public Bing Maps REST endpoint.
pub const BING_BASE_URL: &str = "http://dev.virtualearth.net";

/// Maximum number of points per Bing request.
pub const BING_MAX_POINTS: usize = 100;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BingResponse {
    status_code: u16,
    #[serde(default)]
    error_details: Vec<String>,
    #[serde(default)]
    resource_sets: Vec<BingResourceSet>,
}

#[derive(Debug, Deserialize)]
struct BingResourceSet {
    #[serde(default)]
    resources: Vec<BingResource>,
}

#[derive(Debug, Deserialize)]
struct BingResource {
    #[serde(default)]
    elevations: Vec<f64>,
}

impl BingResponse {
    fn into_elevations(self) -> Result<Vec<f64>> {
        if self.status_code != 200 {
            let detail = self
                .error_details
                .into_iter()
                .next()
                .unwrap_or_else(|| format!("status code {}", self.status_code));
            return Err(ProviderError::Api(detail));
        }

        self.resource_sets
            .into_iter()
            .next()
            .and_then(|set| set.resources.into_iter().next())
            .map(|resource| resource.elevations)
            .ok_or_else(|| ProviderError::MalformedResponse("no elevation resource".to_string()))
    }
}

/// Elevation source backed by the Bing Maps Elevations API.
pub struct BingElevation {
    key: String,
    base_url: Url,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for BingElevation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BingElevation")
            .field("base_url", &self.base_url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl BingElevation {
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
            base_url: options.base_url_parsed(BING_BASE_URL)?,
            client: options.build_client()?,
        })
    }

    /// Request URL for `points`.
    ///
    /// The point list is sent verbatim; only the key is form-encoded.
    pub fn request_url(&self, points: &[Point]) -> Url {
        let list = points
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let mut url = endpoint(&self.base_url, &["REST", "v1", "Elevation", "List"]);
        url.set_query(Some(&format!("points={}&heights=sealevel", list)));
        url.query_pairs_mut().append_pair("key", &self.key);
        url
    }

    /// Fetch sea-level elevations for `points`.
    pub fn fetch(&self, points: &[Point]) -> Result<Vec<f64>> {
        debug!(points = points.len(), "requesting Bing elevations");
        let response: BingResponse = get_json(&self.client, self.request_url(points))?;
        response.into_elevations()
    }
}

impl ElevationSource for BingElevation {
    fn name(&self) -> &str {
        "bing"
    }

    fn max_points_per_request(&self) -> usize {
        BING_MAX_POINTS
    }

    fn elevations(&self, points: &[Point]) -> std::result::Result<Vec<f64>, SourceError> {
        Ok(self.fetch(points)?)
    }
}
