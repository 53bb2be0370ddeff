//! Shared blocking HTTP plumbing for the elevation clients.

use crate::{ProviderError, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for a single elevation request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest response excerpt kept in [`ProviderError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Connection settings shared by all elevation clients.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Override for the service root URL (scheme and host, no trailing slash).
    pub base_url: Option<String>,
    /// Timeout applied to each request.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Use `base_url` instead of the service's public endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url.as_deref().unwrap_or(default)
    }

    /// Parsed service root, falling back to `default`.
    pub(crate) fn base_url_parsed(&self, default: &str) -> Result<Url> {
        let base = self.base_url_or(default);
        let url = Url::parse(base)
            .map_err(|e| ProviderError::InvalidBaseUrl(format!("{}: {}", base, e)))?;
        if url.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl(base.to_string()));
        }
        Ok(url)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::blocking::Client> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}

/// `base` with `segments` appended to its path, each one percent-encoded.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Only fails for cannot-be-a-base URLs, rejected in `base_url_parsed`
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments.iter().copied());
    }
    url
}

/// GET `url` and decode the body as `T`.
///
/// Elevation APIs report their own errors inside the JSON body, often with a
/// 4xx status, so the body is decoded first. The HTTP status only decides the
/// error when the body cannot be decoded.
pub(crate) fn get_json<T: DeserializeOwned>(
    client: &reqwest::blocking::Client,
    url: Url,
) -> Result<T> {
    let response = client.get(url).send()?;
    let status = response.status();
    let body = response.text()?;
    debug!(status = status.as_u16(), bytes = body.len(), "elevation response");

    match serde_json::from_str(&body) {
        Ok(data) => Ok(data),
        Err(_) if !status.is_success() => Err(ProviderError::Status {
            code: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY),
        }),
        Err(e) => Err(ProviderError::Decode(e)),
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
