//! Error types for the heightmap command.

use hmapgen_core::HeightmapError;
use hmapgen_providers::ProviderError;
use thiserror::Error;

/// Errors that can occur while producing a heightmap file.
#[derive(Debug, Error)]
pub enum HmapgenError {
    #[error(transparent)]
    Heightmap(#[from] HeightmapError),

    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Lines describing `err` and its causes, top-level message first.
///
/// Messages often embed their cause already; a cause is only listed when its
/// text does not appear in a line above it.
pub fn report_lines(err: &(dyn std::error::Error + 'static)) -> Vec<String> {
    let mut lines = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !lines.iter().any(|line| line.contains(&text)) {
            lines.push(format!("caused by: {}", text));
        }
        cause = inner.source();
    }
    lines
}
