//! Error types for the elevation API clients.

use thiserror::Error;

/// Errors that can occur when querying an elevation API.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request error (connection, timeout, body read).
    ///
    /// The request URL is removed first since it carries the API key.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[source] reqwest::Error),

    /// Response body is not the expected JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server answered with a non-success status and no usable body.
    #[error("HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The API reported an error in its response.
    #[error("Elevation API error: {0}")]
    Api(String),

    /// JSON decoded but lacks the elevation data.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No API key was configured.
    #[error("API key is empty")]
    EmptyKey,

    /// The service URL override is not a usable base URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::HttpRequest(err.without_url())
    }
}
